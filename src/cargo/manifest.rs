//! Read-only views over Cargo.toml files
//!
//! Only the tables the audit cares about are exposed. Both `[table]` and
//! inline `{ ... }` forms are accepted wherever Cargo accepts them.

use crate::core::error::{AuditResult, ManifestError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use toml_edit::{DocumentMut, TableLike};

/// Read and parse a manifest, classifying every failure as a [`ManifestError`]
pub fn load_document(path: &Path) -> AuditResult<DocumentMut> {
  let content = std::fs::read_to_string(path).map_err(|e| ManifestError::from_io(path, &e))?;

  let doc = content.parse::<DocumentMut>().map_err(|e| ManifestError::Malformed {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })?;

  Ok(doc)
}

/// Names declared in `[workspace.dependencies]` of the root manifest.
///
/// The declared specs (versions, features, paths) play no part in deciding
/// whether an entry is referenced, so only the keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceDependencySet {
  names: BTreeSet<String>,
}

impl WorkspaceDependencySet {
  /// Load from the root manifest. The `workspace.dependencies` table is required.
  pub fn load(path: &Path) -> AuditResult<Self> {
    let doc = load_document(path)?;
    Self::from_document(path, &doc)
  }

  pub fn from_document(path: &Path, doc: &DocumentMut) -> AuditResult<Self> {
    let deps = doc
      .get("workspace")
      .and_then(|w| w.as_table_like())
      .and_then(|w| w.get("dependencies"))
      .and_then(|d| d.as_table_like())
      .ok_or_else(|| ManifestError::MissingTable {
        path: path.to_path_buf(),
        table: "workspace.dependencies".to_string(),
      })?;

    Ok(Self {
      names: dependency_names(deps),
    })
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  /// Remove `name`, returning whether it was still declared
  pub fn remove(&mut self, name: &str) -> bool {
    self.names.remove(name)
  }

  /// Remaining names in order
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }
}

impl FromIterator<String> for WorkspaceDependencySet {
  fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
    Self {
      names: iter.into_iter().collect(),
    }
  }
}

/// A member crate's manifest, reduced to the dependency names it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrateManifest {
  pub dependencies: BTreeSet<String>,
  pub build_dependencies: BTreeSet<String>,
  pub dev_dependencies: BTreeSet<String>,
  /// `target.<predicate>.dependencies`, keyed by predicate, recognized predicates only
  pub target_dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl CrateManifest {
  /// Load a member manifest. A `[dependencies]` table is required (it may be empty).
  pub fn load(path: &Path, target_prefix: &str) -> AuditResult<Self> {
    let doc = load_document(path)?;
    Self::from_document(path, &doc, target_prefix)
  }

  /// Load the root manifest scanned for its `[package]`. Cargo doesn't require a
  /// `[dependencies]` table there, so a missing one reads as empty.
  pub fn load_root_package(path: &Path, target_prefix: &str) -> AuditResult<Self> {
    let doc = load_document(path)?;
    Self::parse(path, &doc, target_prefix, false)
  }

  pub fn from_document(path: &Path, doc: &DocumentMut, target_prefix: &str) -> AuditResult<Self> {
    Self::parse(path, doc, target_prefix, true)
  }

  fn parse(path: &Path, doc: &DocumentMut, target_prefix: &str, require_dependencies: bool) -> AuditResult<Self> {
    let dependencies = match doc.get("dependencies").and_then(|d| d.as_table_like()) {
      Some(deps) => dependency_names(deps),
      None if !require_dependencies => BTreeSet::new(),
      None => {
        return Err(
          ManifestError::MissingTable {
            path: path.to_path_buf(),
            table: "dependencies".to_string(),
          }
          .into(),
        );
      }
    };

    let section = |name: &str| {
      doc
        .get(name)
        .and_then(|d| d.as_table_like())
        .map(dependency_names)
        .unwrap_or_default()
    };

    let mut target_dependencies = BTreeMap::new();
    if let Some(targets) = doc.get("target").and_then(|t| t.as_table_like()) {
      // Keys that don't carry the prefix (e.g. bare target triples) are ignored
      for (predicate, block) in targets.iter().filter(|(key, _)| key.starts_with(target_prefix)) {
        if let Some(deps) = block
          .as_table_like()
          .and_then(|b| b.get("dependencies"))
          .and_then(|d| d.as_table_like())
        {
          target_dependencies.insert(predicate.to_string(), dependency_names(deps));
        }
      }
    }

    Ok(Self {
      dependencies,
      build_dependencies: section("build-dependencies"),
      dev_dependencies: section("dev-dependencies"),
      target_dependencies,
    })
  }

  /// Union of every recognized dependency section
  pub fn referenced_names(&self) -> BTreeSet<&str> {
    self
      .dependencies
      .iter()
      .chain(&self.build_dependencies)
      .chain(&self.dev_dependencies)
      .chain(self.target_dependencies.values().flatten())
      .map(String::as_str)
      .collect()
  }
}

/// Whether a manifest declares `[package]`
pub fn has_package(doc: &DocumentMut) -> bool {
  doc.get("package").and_then(|p| p.as_table_like()).is_some()
}

fn dependency_names(table: &dyn TableLike) -> BTreeSet<String> {
  table.iter().map(|(name, _)| name.to_string()).collect()
}

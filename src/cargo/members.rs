//! Resolve the fixed list of manifests an audit reads

use crate::cargo::manifest::{has_package, load_document};
use crate::core::config::AuditConfig;
use crate::core::error::{AuditError, AuditResult, ManifestError, ResultExt};
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

/// Root manifest plus the ordered member manifests of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSet {
  pub root: PathBuf,
  pub members: Vec<PathBuf>,
  /// The root manifest was added to `members` because it declares `[package]`
  pub root_package: bool,
}

impl ManifestSet {
  /// Build the manifest list for `workspace_root`.
  ///
  /// An explicit `members` list in the config is taken verbatim. Otherwise the
  /// list is derived from `workspace.members` / `workspace.exclude` of the root
  /// manifest. Member manifests are never checked for existence here; a missing
  /// one fails the audit itself.
  pub fn resolve(workspace_root: &Path, config: &AuditConfig) -> AuditResult<Self> {
    let root = workspace_root.join("Cargo.toml");

    let (members, root_package) = match &config.members {
      Some(members) => (members.iter().map(|m| manifest_path(workspace_root, m)).collect(), false),
      None => {
        let doc = load_document(&root)?;
        let root_package = config.include_root_package && has_package(&doc);
        (derive_members(workspace_root, &root, &doc, root_package)?, root_package)
      }
    };

    Ok(Self {
      root,
      members,
      root_package,
    })
  }

  /// Whether `path` is the root manifest added on account of its `[package]`
  pub fn is_root_package(&self, path: &Path) -> bool {
    self.root_package && path == self.root
  }
}

/// Map a member entry to its manifest: directories get `Cargo.toml` appended
fn manifest_path(workspace_root: &Path, member: &Path) -> PathBuf {
  let path = workspace_root.join(member);
  if path.extension().is_some_and(|ext| ext == "toml") {
    path
  } else {
    path.join("Cargo.toml")
  }
}

fn derive_members(
  workspace_root: &Path,
  root_manifest: &Path,
  doc: &DocumentMut,
  root_package: bool,
) -> AuditResult<Vec<PathBuf>> {
  let patterns = string_array(root_manifest, doc, "members")?;
  let excludes: Vec<PathBuf> = string_array(root_manifest, doc, "exclude")?
    .iter()
    .map(|e| workspace_root.join(e))
    .collect();

  let mut manifests = Vec::new();
  if root_package {
    manifests.push(root_manifest.to_path_buf());
  }

  for pattern in &patterns {
    for dir in expand_member(workspace_root, pattern)? {
      if excludes.iter().any(|ex| dir.starts_with(ex)) {
        continue;
      }
      let manifest = dir.join("Cargo.toml");
      if !manifests.contains(&manifest) {
        manifests.push(manifest);
      }
    }
  }

  Ok(manifests)
}

/// Expand one `workspace.members` entry into crate directories
fn expand_member(workspace_root: &Path, pattern: &str) -> AuditResult<Vec<PathBuf>> {
  if !pattern.contains(['*', '?', '[']) {
    return Ok(vec![workspace_root.join(pattern)]);
  }

  let full = format!(
    "{}/{}",
    glob::Pattern::escape(&workspace_root.to_string_lossy()),
    pattern.trim_start_matches("./")
  );

  let mut dirs = Vec::new();
  let entries = glob::glob(&full).with_context(|| format!("in `workspace.members` entry \"{}\"", pattern))?;
  for entry in entries {
    let path = entry.map_err(|e| ManifestError::from_glob(&e))?;
    if path.is_dir() {
      dirs.push(path);
    }
  }
  dirs.sort();
  Ok(dirs)
}

/// Read `workspace.<key>` as a list of strings (absent → empty)
fn string_array(path: &Path, doc: &DocumentMut, key: &str) -> AuditResult<Vec<String>> {
  let Some(item) = doc
    .get("workspace")
    .and_then(|w| w.as_table_like())
    .and_then(|w| w.get(key))
  else {
    return Ok(Vec::new());
  };

  let malformed = || -> AuditError {
    ManifestError::Malformed {
      path: path.to_path_buf(),
      reason: format!("`workspace.{}` must be an array of strings", key),
    }
    .into()
  };

  item
    .as_array()
    .ok_or_else(malformed)?
    .iter()
    .map(|v| v.as_str().map(str::to_string).ok_or_else(malformed))
    .collect()
}

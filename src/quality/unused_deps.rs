//! Unused workspace dependency detection
//!
//! Subtracts every name referenced by a member manifest from the root's
//! `[workspace.dependencies]`; whatever survives is unused. Only manifests are
//! read, never source files.

use crate::cargo::manifest::{CrateManifest, WorkspaceDependencySet};
use crate::cargo::members::ManifestSet;
use crate::core::error::AuditResult;

/// Outcome of one audit run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
  /// Entries in `[workspace.dependencies]`
  pub total: usize,
  /// Distinct workspace dependencies referenced by at least one member
  pub used: usize,
  /// Member manifests scanned
  pub manifests_scanned: usize,
  /// Names left over, in name order
  pub unused: Vec<String>,
}

impl AuditReport {
  pub fn is_clean(&self) -> bool {
    self.unused.is_empty()
  }
}

/// Tracks the shrinking workspace set while member manifests are applied
pub struct UnusedDepsAudit {
  remaining: WorkspaceDependencySet,
  total: usize,
  used: usize,
  manifests_scanned: usize,
}

impl UnusedDepsAudit {
  pub fn new(workspace_deps: WorkspaceDependencySet) -> Self {
    Self {
      total: workspace_deps.len(),
      remaining: workspace_deps,
      used: 0,
      manifests_scanned: 0,
    }
  }

  /// Remove every workspace dependency `manifest` references
  pub fn apply(&mut self, manifest: &CrateManifest) {
    for name in manifest.referenced_names() {
      if self.remaining.remove(name) {
        self.used += 1;
      }
    }
    self.manifests_scanned += 1;
  }

  pub fn finish(self) -> AuditReport {
    AuditReport {
      total: self.total,
      used: self.used,
      manifests_scanned: self.manifests_scanned,
      unused: self.remaining.iter().map(str::to_string).collect(),
    }
  }
}

/// Run the audit over `manifests`. Any unreadable manifest aborts the whole run.
pub fn audit(manifests: &ManifestSet, target_prefix: &str) -> AuditResult<AuditReport> {
  let mut audit = UnusedDepsAudit::new(WorkspaceDependencySet::load(&manifests.root)?);

  for path in &manifests.members {
    let manifest = if manifests.is_root_package(path) {
      CrateManifest::load_root_package(path, target_prefix)?
    } else {
      CrateManifest::load(path, target_prefix)?
    };
    audit.apply(&manifest);
  }

  Ok(audit.finish())
}

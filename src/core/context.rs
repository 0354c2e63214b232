//! Workspace context - resolved once in main.rs, passed to the command
//!
//! Holds the loaded configuration and the fixed manifest
//! list. Building it reads at most the config file and the root manifest.

use crate::cargo::members::ManifestSet;
use crate::core::config::AuditConfig;
use crate::core::error::AuditResult;
use std::path::Path;

/// Everything a run needs before it starts reading member manifests
#[derive(Debug, Clone)]
pub struct AuditContext {
  /// ws-audit.toml, or defaults when absent
  pub config: AuditConfig,

  /// Root manifest plus member manifests, in scan order
  pub manifests: ManifestSet,
}

impl AuditContext {
  /// Build the context for the workspace at `workspace_root`
  pub fn build(workspace_root: &Path) -> AuditResult<Self> {
    let config = AuditConfig::load(workspace_root)?;
    let manifests = ManifestSet::resolve(workspace_root, &config)?;

    Ok(Self { config, manifests })
  }
}

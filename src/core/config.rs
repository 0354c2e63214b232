use crate::core::error::{AuditResult, ConfigError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix a `target` key must start with to count as a conditional dependency block
pub const DEFAULT_TARGET_PREFIX: &str = "cfg(";

/// Configuration for cargo-ws-audit
/// Searched in order: ws-audit.toml, .ws-audit.toml, .cargo/ws-audit.toml, .config/ws-audit.toml
///
/// # Example
///
/// ```toml
/// members = ["lib", "lib/proc-macros", "cli"]
/// target-prefix = "cfg("
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AuditConfig {
  /// Fixed list of member crates to scan (directories or manifest paths,
  /// relative to the workspace root). Derived from `workspace.members` when unset.
  #[serde(default)]
  pub members: Option<Vec<PathBuf>>,

  /// Recognized prefix for conditional `target.<key>` blocks
  #[serde(default = "default_target_prefix")]
  pub target_prefix: String,

  /// Scan the root manifest too when it declares `[package]` (derived members only)
  #[serde(default = "default_include_root_package")]
  pub include_root_package: bool,
}

fn default_target_prefix() -> String {
  DEFAULT_TARGET_PREFIX.to_string()
}

fn default_include_root_package() -> bool {
  true
}

impl Default for AuditConfig {
  fn default() -> Self {
    Self {
      members: None,
      target_prefix: default_target_prefix(),
      include_root_package: default_include_root_package(),
    }
  }
}

impl AuditConfig {
  /// Find config file in search order: ws-audit.toml, .ws-audit.toml, .cargo/ws-audit.toml, .config/ws-audit.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("ws-audit.toml"),
      path.join(".ws-audit.toml"),
      path.join(".cargo").join("ws-audit.toml"),
      path.join(".config").join("ws-audit.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the workspace root, falling back to defaults when no file exists
  pub fn load(path: &Path) -> AuditResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Malformed {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;
    let config: AuditConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Malformed {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;

    config.validate()?;
    Ok(config)
  }

  /// Validate configuration values
  pub fn validate(&self) -> AuditResult<()> {
    if self.target_prefix.is_empty() {
      return Err(
        ConfigError::Invalid {
          field: "target-prefix".to_string(),
          reason: "must not be empty".to_string(),
        }
        .into(),
      );
    }

    if let Some(members) = &self.members
      && let Some(empty) = members.iter().position(|m| m.as_os_str().is_empty())
    {
      return Err(
        ConfigError::Invalid {
          field: "members".to_string(),
          reason: format!("entry {} is an empty path", empty),
        }
        .into(),
      );
    }

    Ok(())
  }
}

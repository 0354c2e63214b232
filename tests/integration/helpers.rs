//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway workspace on disk
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a workspace whose root manifest declares `workspace_deps`
  /// (lines of the `[workspace.dependencies]` table) and globs `crates/*`
  pub fn new(workspace_deps: &[&str]) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    let mut cargo_toml = String::from(
      r#"[workspace]
members = ["crates/*"]
resolver = "2"

[workspace.package]
edition = "2021"
license = "MIT"

[workspace.dependencies]
"#,
    );
    for line in workspace_deps {
      cargo_toml.push_str(line);
      cargo_toml.push('\n');
    }

    std::fs::write(path.join("Cargo.toml"), cargo_toml)?;
    Ok(Self { _root: root, path })
  }

  /// Add a crate under `crates/<name>`; `sections` is appended after `[package]`
  pub fn add_crate(&self, name: &str, sections: &str) -> Result<PathBuf> {
    let crate_path = self.path.join("crates").join(name);
    std::fs::create_dir_all(crate_path.join("src"))?;

    let cargo_toml = format!(
      r#"[package]
name = "{}"
version = "0.1.0"
edition.workspace = true
license.workspace = true

{}
"#,
      name, sections
    );
    std::fs::write(crate_path.join("Cargo.toml"), cargo_toml)?;
    std::fs::write(crate_path.join("src/lib.rs"), format!("//! {} crate\n", name))?;

    Ok(crate_path)
  }

  /// Write a file relative to the workspace root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }
}

/// Run cargo-ws-audit, returning its output whatever the exit status
pub fn run_ws_audit_raw(cwd: &Path) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_cargo-ws-audit");

  Command::new(bin)
    .current_dir(cwd)
    .arg("ws-audit")
    .output()
    .context("Failed to run cargo-ws-audit")
}

/// Run cargo-ws-audit and return stdout, failing if the process failed
pub fn run_ws_audit(cwd: &Path) -> Result<String> {
  let output = run_ws_audit_raw(cwd)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "cargo-ws-audit failed\nstdout: {}\nstderr: {}",
      stdout,
      stderr
    );
  }

  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

//! Integration tests for the unused workspace dependency audit

use crate::helpers::{TestWorkspace, run_ws_audit, run_ws_audit_raw};
use anyhow::Result;

#[test]
fn test_reports_unused_dependency() -> Result<()> {
  let ws = TestWorkspace::new(&["serde = \"1.0\"", "tokio = \"1.0\"", "rand = \"0.8\""])?;
  ws.add_crate("lib-a", "[dependencies]\nserde = { workspace = true }")?;
  ws.add_crate(
    "lib-b",
    "[dependencies]\n\n[dev-dependencies]\ntokio = { workspace = true }",
  )?;

  let stdout = run_ws_audit(&ws.path)?;

  assert_eq!(
    stdout,
    "Found 3 top-level dependencies\n\
     Found 2 used dependencies across 2 manifests\n\
     Found 1 unused dependencies:\n\
     rand\n"
  );
  Ok(())
}

#[test]
fn test_every_section_counts_as_used() -> Result<()> {
  let ws = TestWorkspace::new(&[
    "serde = \"1.0\"",
    "cc = \"1.0\"",
    "tempfile = \"3\"",
    "libc = \"0.2\"",
  ])?;
  ws.add_crate(
    "lib-a",
    r#"[dependencies]
serde.workspace = true

[build-dependencies]
cc = { workspace = true }

[dev-dependencies]
tempfile = { workspace = true }

[target.'cfg(unix)'.dependencies]
libc = { workspace = true }"#,
  )?;

  let stdout = run_ws_audit(&ws.path)?;

  assert!(stdout.contains("Found 4 top-level dependencies"));
  assert!(stdout.contains("Found 4 used dependencies across 1 manifests"));
  assert!(!stdout.contains("unused"), "nothing should be unused:\n{}", stdout);
  Ok(())
}

#[test]
fn test_bare_target_triple_is_not_recognized() -> Result<()> {
  let ws = TestWorkspace::new(&["jemallocator = \"0.5\""])?;
  ws.add_crate(
    "lib-a",
    "[dependencies]\n\n[target.x86_64-unknown-linux-gnu.dependencies]\njemallocator = { workspace = true }",
  )?;

  let stdout = run_ws_audit(&ws.path)?;

  assert!(stdout.contains("Found 1 unused dependencies:\njemallocator\n"));
  Ok(())
}

#[test]
fn test_unused_listed_once_in_name_order() -> Result<()> {
  let ws = TestWorkspace::new(&["zstd = \"0.13\"", "anyhow = \"1\"", "log = \"0.4\""])?;
  ws.add_crate("lib-a", "[dependencies]\nlog = { workspace = true }")?;
  ws.add_crate("lib-b", "[dependencies]\nlog = { workspace = true }")?;
  ws.add_crate("lib-c", "[dependencies]")?;

  let stdout = run_ws_audit(&ws.path)?;

  assert!(stdout.contains("Found 1 used dependencies across 3 manifests"));
  assert!(stdout.ends_with("Found 2 unused dependencies:\nanyhow\nzstd\n"));
  assert_eq!(stdout.matches("zstd").count(), 1);
  Ok(())
}

#[test]
fn test_renamed_dependency_uses_its_key() -> Result<()> {
  let ws = TestWorkspace::new(&["tokio-compat = { package = \"tokio\", version = \"1\" }"])?;
  ws.add_crate("lib-a", "[dependencies]\ntokio-compat = { workspace = true }")?;

  let stdout = run_ws_audit(&ws.path)?;

  assert!(stdout.contains("Found 1 used dependencies"));
  Ok(())
}

#[test]
fn test_empty_workspace_table() -> Result<()> {
  let ws = TestWorkspace::new(&[])?;
  ws.add_crate("lib-a", "[dependencies]")?;

  let stdout = run_ws_audit(&ws.path)?;

  assert_eq!(
    stdout,
    "Found 0 top-level dependencies\nFound 0 used dependencies across 1 manifests\n"
  );
  Ok(())
}

#[test]
fn test_output_is_idempotent() -> Result<()> {
  let ws = TestWorkspace::new(&["serde = \"1.0\"", "rand = \"0.8\"", "log = \"0.4\""])?;
  ws.add_crate("lib-a", "[dependencies]\nserde = { workspace = true }")?;

  let first = run_ws_audit(&ws.path)?;
  let second = run_ws_audit(&ws.path)?;

  assert_eq!(first, second);
  Ok(())
}

#[test]
fn test_missing_manifest_aborts_without_report() -> Result<()> {
  let ws = TestWorkspace::new(&["serde = \"1.0\""])?;
  ws.add_crate("lib-a", "[dependencies]\nserde = { workspace = true }")?;
  ws.write_file("ws-audit.toml", "members = [\"crates/lib-a\", \"crates/gone\"]\n")?;

  let output = run_ws_audit_raw(&ws.path)?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!output.status.success());
  assert!(output.stdout.is_empty(), "no report line may be printed");
  assert!(stderr.contains("Manifest not found"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_malformed_manifest_fails_like_missing_one() -> Result<()> {
  let ws = TestWorkspace::new(&["serde = \"1.0\""])?;
  ws.add_crate("lib-a", "[dependencies\nserde = ")?;

  let output = run_ws_audit_raw(&ws.path)?;

  assert!(output.stdout.is_empty());
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse manifest"));
  Ok(())
}

#[test]
fn test_member_without_dependencies_table_fails() -> Result<()> {
  let ws = TestWorkspace::new(&["serde = \"1.0\""])?;
  ws.add_crate("lib-a", "[dev-dependencies]\nserde = { workspace = true }")?;

  let output = run_ws_audit_raw(&ws.path)?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(output.stdout.is_empty());
  assert!(stderr.contains("has no [dependencies] table"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_root_without_workspace_dependencies_fails() -> Result<()> {
  let ws = TestWorkspace::new(&[])?;
  ws.write_file("Cargo.toml", "[workspace]\nmembers = []\n")?;

  let output = run_ws_audit_raw(&ws.path)?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("[workspace.dependencies]"));
  Ok(())
}

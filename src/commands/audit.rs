//! Audit command implementation

use crate::core::context::AuditContext;
use crate::core::error::AuditResult;
use crate::quality::{AuditReport, audit};
use std::io::{self, Write};

/// Run the audit and print its report
///
/// The report is computed in full before the first line is written, so a
/// failing manifest leaves stdout empty. Unused dependencies are not an error.
pub fn run_audit(ctx: &AuditContext) -> AuditResult<()> {
  let report = audit(&ctx.manifests, &ctx.config.target_prefix)?;

  let stdout = io::stdout();
  write_report(&mut stdout.lock(), &report)?;
  Ok(())
}

fn write_report(out: &mut impl Write, report: &AuditReport) -> io::Result<()> {
  writeln!(out, "Found {} top-level dependencies", report.total)?;
  writeln!(
    out,
    "Found {} used dependencies across {} manifests",
    report.used, report.manifests_scanned
  )?;

  if !report.is_clean() {
    writeln!(out, "Found {} unused dependencies:", report.unused.len())?;
    for name in &report.unused {
      writeln!(out, "{}", name)?;
    }
  }

  Ok(())
}

mod cargo;
mod commands;
mod core;
mod quality;

use crate::core::context::AuditContext;
use crate::core::error::{AuditError, print_error};
use clap::Parser;

/// Find workspace dependencies no member crate references
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  WsAudit(AuditCli),
}

/// Report `[workspace.dependencies]` entries that no member manifest references.
///
/// Reads Cargo.toml in the current directory and the member manifests listed in
/// ws-audit.toml (or `workspace.members` when there is no config file).
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct AuditCli {}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
}

fn main() {
  let CargoCli::WsAudit(AuditCli {}) = CargoCli::parse();

  let workspace_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(AuditError::Io(e)),
  };

  let result = AuditContext::build(&workspace_root).and_then(|ctx| commands::run_audit(&ctx));

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: AuditError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

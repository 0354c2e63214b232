//! CLI commands for cargo-ws-audit
//!
//! - **audit**: Report `[workspace.dependencies]` entries no member crate references
//!
//! Commands accept `&AuditContext` so the config and manifest list are resolved once.

pub mod audit;

pub use audit::run_audit;

//! Core plumbing for cargo-ws-audit
//!
//! - **config**: ws-audit.toml parsing and validation
//! - **context**: Workspace root, config and manifest list for one run
//! - **error**: Error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;

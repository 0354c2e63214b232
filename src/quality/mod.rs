//! Workspace quality analyses
//!
//! - **unused_deps**: `[workspace.dependencies]` entries no member references

pub mod unused_deps;

pub use unused_deps::{AuditReport, audit};

//! Cargo manifest access
//!
//! - **manifest**: Read-only views over root and member Cargo.toml files
//! - **members**: Resolve the fixed list of member manifests to scan

pub mod manifest;
pub mod members;

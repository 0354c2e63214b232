//! Integration tests for cargo-ws-audit

mod helpers;
mod test_audit;

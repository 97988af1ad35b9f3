//! Data models
//!
//! Shared between directory-client and the TUI. Field names on the wire are
//! camelCase, matching the remote Employee service contract.

pub mod employee;

// Re-exports
pub use employee::*;

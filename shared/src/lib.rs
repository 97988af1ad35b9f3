//! Shared types for Staffdeck
//!
//! Data model types used by both the HTTP client and the terminal UI.

pub mod models;

// Re-exports
pub use models::{Address, ApartmentNumber, Employee};
pub use serde::{Deserialize, Serialize};

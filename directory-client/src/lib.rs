//! Directory Client - HTTP client for the remote Employee service
//!
//! Provides network-based HTTP calls to the Employee REST API.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::models::{Address, ApartmentNumber, Employee};

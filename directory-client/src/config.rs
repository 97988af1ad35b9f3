//! Client configuration

/// Environment variable overriding the Employee service base URL.
pub const API_URL_ENV: &str = "STAFFDECK_API_URL";

/// Default Employee service base URL.
pub const DEFAULT_API_URL: &str = "https://procom-interview-employee-test.azurewebsites.net";

/// Client configuration for connecting to the Employee service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "https://employees.example.com")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Load configuration from the environment
    ///
    /// Reads `STAFFDECK_API_URL`, falling back to the default service URL.
    /// A `.env` file in the working directory is honored.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

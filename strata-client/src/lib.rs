//! Strata HTTP Client
//!
//! A simple, type-safe HTTP client for the Strata managed ML platform API.
//!
//! Every method issues a single call against the regional API endpoint; the
//! platform owns all scheduling, retrying and state transitions. The only
//! client-side logic is the bounded polling helper in [`wait`], which blocks
//! until a resource reaches a target state.
//!
//! # Example
//!
//! ```no_run
//! use strata_client::PlatformClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlatformClient::new("https://us-central1.api.strata.example");
//!
//!     let job = client
//!         .get_batch_prediction_job(
//!             "projects/acme/locations/us-central1/batchPredictionJobs/123",
//!         )
//!         .await?;
//!
//!     println!("state: {}", job.state);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod pipelines;
pub mod wait;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use wait::{PollOptions, WaitError, WaitOutcome};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Strata platform API
///
/// Methods are grouped by resource kind:
/// - Batch prediction jobs (create, list, get, cancel, delete, wait)
/// - Training pipelines (create, list, get, cancel, delete, wait)
#[derive(Debug, Clone)]
pub struct PlatformClient {
    /// Base URL of the regional API endpoint
    /// (e.g. "https://us-central1.api.strata.example")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl PlatformClient {
    /// Create a new platform client
    ///
    /// # Arguments
    /// * `base_url` - The regional API endpoint
    ///
    /// # Example
    /// ```
    /// use strata_client::PlatformClient;
    ///
    /// let client = PlatformClient::new("https://us-central1.api.strata.example");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new platform client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The regional API endpoint
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (cancel, delete)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PlatformClient::new("https://us-central1.api.strata.example");
        assert_eq!(client.base_url(), "https://us-central1.api.strata.example");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = PlatformClient::new("https://us-central1.api.strata.example/");
        assert_eq!(client.base_url(), "https://us-central1.api.strata.example");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = PlatformClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}

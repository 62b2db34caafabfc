//! Jobdef HTTP Client
//!
//! A small, type-safe HTTP client for the job definition lookup service.
//!
//! # Example
//!
//! ```no_run
//! use jobdef_client::BatchClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), jobdef_client::ClientError> {
//!     let client = BatchClient::new("https://batch.us-east-1.amazonaws.com");
//!
//!     let revisions = client.describe_job_definitions_by_name("my-batch-job").await?;
//!     println!("Found {} revision(s)", revisions.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod job_definitions;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// HTTP client for the job definition lookup service
#[derive(Debug, Clone)]
pub struct BatchClient {
    /// Base URL of the service (e.g., "https://batch.us-east-1.amazonaws.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl BatchClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the lookup service
    ///
    /// # Example
    /// ```
    /// use jobdef_client::BatchClient;
    ///
    /// let client = BatchClient::new("http://localhost:4566");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use jobdef_client::BatchClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BatchClient::with_client("http://localhost:4566", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success status codes are turned into [`ClientError::ApiError`]
    /// carrying the response body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                service_message(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Error body returned by the service on failure
#[derive(Deserialize)]
struct ServiceErrorBody {
    message: String,
}

/// Pulls the `message` out of a service error body, falling back to the raw text
fn service_message(body: &str) -> String {
    serde_json::from_str::<ServiceErrorBody>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| body.to_string())
}

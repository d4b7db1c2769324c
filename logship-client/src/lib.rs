//! Logship Ingestion Client
//!
//! A small, typed HTTP client for a SigNoz-style log ingestion endpoint.
//!
//! The endpoint accepts a JSON array of [`LogRecord`]s per request and
//! authenticates with an access token sent in the `signoz-access-token` header.
//!
//! # Example
//!
//! ```no_run
//! use logship_client::IngestClient;
//! use logship_core::{LogEvent, LogRecord, Resource};
//!
//! #[tokio::main]
//! async fn main() -> logship_client::Result<()> {
//!     let client = IngestClient::new("https://ingest.in.signoz.cloud:443/v1/logs", "token");
//!
//!     let resource = Resource::new("checkout", "production");
//!     let record = LogRecord::new(LogEvent::info("hello"), &resource, chrono::Utc::now());
//!
//!     client.send_logs(&[record]).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod logs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use logs::ACCESS_TOKEN_HEADER;

use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// HTTP client for the log ingestion endpoint
#[derive(Clone)]
pub struct IngestClient {
    /// Full URL logs are posted to (e.g. "https://ingest.in.signoz.cloud:443/v1/logs")
    endpoint: String,
    /// Credential sent with every request
    access_token: String,
    /// HTTP client instance
    client: Client,
}

impl IngestClient {
    /// Create a new ingestion client with reqwest's default settings
    ///
    /// # Arguments
    /// * `endpoint` - The full ingestion URL
    /// * `access_token` - The ingestion access token
    pub fn new(endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::with_client(endpoint, access_token, Client::new())
    }

    /// Create a new ingestion client whose requests give up after `timeout`
    ///
    /// A request that times out surfaces as [`ClientError::RequestFailed`].
    pub fn with_timeout(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, access_token, client))
    }

    /// Create a new ingestion client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_token: access_token.into(),
            client,
        }
    }

    /// Get the ingestion URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check the status code and turn failures into [`ClientError::ApiError`]
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

impl fmt::Debug for IngestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestClient")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

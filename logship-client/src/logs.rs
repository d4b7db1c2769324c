//! Log ingestion endpoint

use logship_core::LogRecord;

use crate::IngestClient;
use crate::error::Result;

/// Header carrying the ingestion access token
pub const ACCESS_TOKEN_HEADER: &str = "signoz-access-token";

impl IngestClient {
    /// Send a batch of records in a single request
    ///
    /// The body is the records serialized as one JSON array, in order.
    /// An empty slice sends nothing.
    ///
    /// # Arguments
    /// * `records` - The records to send
    pub async fn send_logs(&self, records: &[LogRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        tracing::debug!("Posting {} log records to {}", records.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(records)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}

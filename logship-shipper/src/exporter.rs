//! Exporter seam
//!
//! Sends one batch per call. The shipper only cares whether the call
//! succeeded; on error the batch is requeued.

use anyhow::Result;
use async_trait::async_trait;
use logship_client::{ClientError, IngestClient};
use logship_core::Batch;

/// Transport for batches of log records
#[async_trait]
pub trait LogExporter: Send + Sync {
    /// Sends `batch` as a single request
    ///
    /// # Arguments
    /// * `batch` - The records to send, in order
    async fn export(&self, batch: &Batch) -> Result<()>;
}

/// HTTP implementation posting to the ingestion endpoint
#[async_trait]
impl LogExporter for IngestClient {
    async fn export(&self, batch: &Batch) -> Result<()> {
        self.send_logs(batch.records()).await.map_err(|e| {
            let reason = failure_reason(&e);
            anyhow::Error::new(e)
                .context(format!("Failed to send logs to {} ({})", self.endpoint(), reason))
        })
    }
}

/// Short operator-facing classification of a failed request
fn failure_reason(err: &ClientError) -> &'static str {
    if err.is_timeout() {
        "timed out"
    } else if err.is_client_error() {
        "rejected by endpoint"
    } else if err.is_server_error() {
        "endpoint unavailable"
    } else {
        "request failed"
    }
}

//! Error types for the shipper

use logship_client::ClientError;
use logship_core::RecordError;
use thiserror::Error;

/// Invalid shipper configuration; the shipper refuses to start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ingestion endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("ingestion endpoint must start with http:// or https:// (got {0:?})")]
    InvalidEndpoint(String),

    #[error("ingestion access token cannot be empty")]
    MissingAccessToken,

    #[error("service name cannot be empty")]
    EmptyServiceName,

    #[error("max batch size must be greater than 0")]
    ZeroBatchSize,

    #[error("max batch delay must be greater than 0")]
    ZeroBatchDelay,

    #[error("max export attempts must be greater than 0")]
    ZeroMaxAttempts,

    #[error("request timeout must be greater than 0")]
    ZeroRequestTimeout,

    #[error("failed to build ingestion client: {0}")]
    HttpClient(#[source] ClientError),

    #[error("log shipper must be created inside a Tokio runtime")]
    NoRuntime,
}

/// Why a log event was not accepted
///
/// Transmission failures are never reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("invalid log event: {0}")]
    Invalid(#[from] RecordError),

    #[error("log shipper is drained and no longer accepts events")]
    Closed,
}

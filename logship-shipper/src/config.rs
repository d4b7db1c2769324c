//! Shipper configuration
//!
//! Endpoint, credential and batching limits. Values are fixed once the shipper
//! is built; invalid values are rejected by [`ShipperConfig::validate`].

use logship_core::Resource;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Default SigNoz cloud ingestion URL
pub const DEFAULT_ENDPOINT: &str = "https://ingest.in.signoz.cloud:443/v1/logs";

/// Default number of buffered records that forces a flush
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Default delay between the first buffered record and its flush
pub const DEFAULT_MAX_BATCH_DELAY: Duration = Duration::from_secs(5);

/// Default number of export attempts before a record is dropped
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default timeout for a single export request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shipper configuration
#[derive(Clone)]
pub struct ShipperConfig {
    /// Full ingestion URL logs are posted to
    pub endpoint: String,

    /// Access token sent in the request header
    pub access_token: String,

    /// Identity of the emitting service, attached to every record
    pub resource: Resource,

    /// Buffered record count that triggers an immediate flush
    pub max_batch_size: usize,

    /// How long the first buffered record may wait before a flush
    pub max_batch_delay: Duration,

    /// Export attempts per record before it is dropped
    pub max_attempts: u32,

    /// Timeout for one export request
    pub request_timeout: Duration,
}

impl ShipperConfig {
    /// Creates a configuration with defaults for everything but the credential and identity
    pub fn new(access_token: impl Into<String>, resource: Resource) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: access_token.into(),
            resource,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_batch_delay: DEFAULT_MAX_BATCH_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn with_max_batch_delay(mut self, max_batch_delay: Duration) -> Self {
        self.max_batch_delay = max_batch_delay;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }

        if self.access_token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }

        if self.resource.service_name.trim().is_empty() {
            return Err(ConfigError::EmptyServiceName);
        }

        if self.max_batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }

        if self.max_batch_delay.is_zero() {
            return Err(ConfigError::ZeroBatchDelay);
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroRequestTimeout);
        }

        Ok(())
    }
}

impl fmt::Debug for ShipperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShipperConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"<redacted>")
            .field("resource", &self.resource)
            .field("max_batch_size", &self.max_batch_size)
            .field("max_batch_delay", &self.max_batch_delay)
            .field("max_attempts", &self.max_attempts)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

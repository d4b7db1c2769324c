//! Server configuration
//!
//! Everything is read from environment variables once at startup. Unset
//! variables fall back to defaults; set but unparseable values are errors.

use anyhow::{Context, Result};
use logship_core::Resource;
use logship_shipper::ShipperConfig;
use logship_shipper::config::DEFAULT_ENDPOINT;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Console filter used in production when `RUST_LOG` is unset
pub const PRODUCTION_LOG_FILTER: &str = "logship_server=info,logship_shipper=info,tower_http=info";

/// Console filter used elsewhere when `RUST_LOG` is unset
pub const DEVELOPMENT_LOG_FILTER: &str =
    "logship_server=debug,logship_shipper=debug,tower_http=debug";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,

    /// Deployment environment (e.g. "development", "production")
    pub environment: String,

    /// Log shipper settings, including the service identity
    pub shipper: ShipperConfig,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SIGNOZ_TOKEN (required)
    /// - PORT (optional, default: 3000)
    /// - APP_ENV (optional, default: development)
    /// - SERVICE_NAME (optional, default: logship-demo)
    /// - SIGNOZ_ENDPOINT (optional, default: SigNoz cloud ingestion URL)
    /// - LOG_BATCH_SIZE (optional, default: 100)
    /// - LOG_BATCH_DELAY_MS (optional, default: 5000)
    /// - LOG_MAX_ATTEMPTS (optional, default: 5)
    /// - LOG_REQUEST_TIMEOUT_MS (optional, default: 10000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Empty values count as unset
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let access_token = lookup("SIGNOZ_TOKEN")
            .ok_or_else(|| anyhow::anyhow!("SIGNOZ_TOKEN environment variable not set"))?;

        let environment = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let service_name = lookup("SERVICE_NAME").unwrap_or_else(|| "logship-demo".to_string());
        let endpoint = lookup("SIGNOZ_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let port = parse_var(&lookup, "PORT", 3000u16)?;
        let max_batch_size = parse_var(&lookup, "LOG_BATCH_SIZE", 100usize)?;
        let batch_delay_ms = parse_var(&lookup, "LOG_BATCH_DELAY_MS", 5_000u64)?;
        let max_attempts = parse_var(&lookup, "LOG_MAX_ATTEMPTS", 5u32)?;
        let request_timeout_ms = parse_var(&lookup, "LOG_REQUEST_TIMEOUT_MS", 10_000u64)?;

        let shipper = ShipperConfig::new(
            access_token,
            Resource::new(service_name, environment.clone()),
        )
        .with_endpoint(endpoint)
        .with_max_batch_size(max_batch_size)
        .with_max_batch_delay(Duration::from_millis(batch_delay_ms))
        .with_max_attempts(max_attempts)
        .with_request_timeout(Duration::from_millis(request_timeout_ms));

        Ok(Self {
            port,
            environment,
            shipper,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        self.shipper
            .validate()
            .context("Invalid log shipper configuration")?;

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Console filter to use when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_production() {
            PRODUCTION_LOG_FILTER
        } else {
            DEVELOPMENT_LOG_FILTER
        }
    }
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", key, raw, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = load(&[("SIGNOZ_TOKEN", "token")]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.shipper.resource.service_name, "logship-demo");
        assert_eq!(config.shipper.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.shipper.max_batch_size, 100);
        assert_eq!(config.shipper.max_batch_delay, Duration::from_secs(5));
        assert_eq!(config.shipper.max_attempts, 5);
        assert_eq!(config.shipper.request_timeout, Duration::from_secs(10));
        assert_eq!(config.default_log_filter(), DEVELOPMENT_LOG_FILTER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_vars() {
        let config = load(&[
            ("SIGNOZ_TOKEN", "token"),
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("SERVICE_NAME", "checkout"),
            ("SIGNOZ_ENDPOINT", "http://collector:4318/v1/logs"),
            ("LOG_BATCH_SIZE", "25"),
            ("LOG_BATCH_DELAY_MS", "250"),
            ("LOG_MAX_ATTEMPTS", "3"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.shipper.resource.environment, "production");
        assert_eq!(config.shipper.resource.service_name, "checkout");
        assert_eq!(config.shipper.endpoint, "http://collector:4318/v1/logs");
        assert_eq!(config.shipper.max_batch_size, 25);
        assert_eq!(config.shipper.max_batch_delay, Duration::from_millis(250));
        assert_eq!(config.shipper.max_attempts, 3);
        assert_eq!(config.default_log_filter(), PRODUCTION_LOG_FILTER);
    }

    #[test]
    fn test_missing_token_is_an_error() {
        assert!(load(&[]).is_err());
        assert!(load(&[("SIGNOZ_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        assert!(load(&[("SIGNOZ_TOKEN", "token"), ("LOG_BATCH_SIZE", "-5")]).is_err());
        assert!(load(&[("SIGNOZ_TOKEN", "token"), ("PORT", "http")]).is_err());
        assert!(load(&[("SIGNOZ_TOKEN", "token"), ("LOG_BATCH_DELAY_MS", "soon")]).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_batch_size() {
        let config = load(&[("SIGNOZ_TOKEN", "token"), ("LOG_BATCH_SIZE", "0")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = load(&[
            ("SIGNOZ_TOKEN", "token"),
            ("SIGNOZ_ENDPOINT", "collector:4318"),
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }
}

//! Application logger
//!
//! Writes every event to the console through `tracing` and hands it to the log
//! shipper. Shipping problems never reach the caller.

use logship_core::{LogEvent, Severity};
use logship_shipper::LogShipper;
use serde_json::Value;

#[derive(Clone)]
pub struct AppLogger {
    shipper: LogShipper,
}

impl AppLogger {
    pub fn new(shipper: LogShipper) -> Self {
        Self { shipper }
    }

    pub fn shipper(&self) -> &LogShipper {
        &self.shipper
    }

    /// Logs an info message with `attributes` (a JSON object, or null for none)
    pub fn info(&self, message: &str, attributes: Value) {
        self.log(event(Severity::Info, message, attributes));
    }

    /// Logs an error message with `attributes` (a JSON object, or null for none)
    pub fn error(&self, message: &str, attributes: Value) {
        self.log(event(Severity::Error, message, attributes));
    }

    pub fn log(&self, event: LogEvent) {
        let attributes = if event.attributes.is_empty() {
            String::new()
        } else {
            format!(" {}", Value::Object(event.attributes.clone()))
        };

        match event.severity {
            Severity::Debug => tracing::debug!("{}{}", event.message, attributes),
            Severity::Info => tracing::info!("{}{}", event.message, attributes),
            Severity::Warn => tracing::warn!("{}{}", event.message, attributes),
            Severity::Error => tracing::error!("{}{}", event.message, attributes),
        }

        if let Err(e) = self.shipper.submit(event) {
            tracing::warn!("Log event not shipped: {}", e);
        }
    }
}

fn event(severity: Severity, message: &str, attributes: Value) -> LogEvent {
    let event = LogEvent::new(severity, message);
    match attributes {
        Value::Object(map) => event.with_attributes(map),
        Value::Null => event,
        other => event.with_attribute("value", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_logger;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_submits_to_shipper() {
        let (logger, capture) = test_logger();

        logger.info("Home route accessed", json!({ "customField": "test value" }));
        logger.shipper().flush().await;

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "Home route accessed");
        assert_eq!(records[0].severity(), Severity::Info);
        assert_eq!(records[0].attributes()["customField"], "test value");
    }

    #[tokio::test]
    async fn test_invalid_event_is_not_shipped() {
        let (logger, capture) = test_logger();

        logger.error("", Value::Null);
        logger.shipper().flush().await;

        assert!(capture.records().is_empty());
        assert_eq!(logger.shipper().buffered_len(), 0);
    }

    #[tokio::test]
    async fn test_non_object_attributes_are_wrapped() {
        let (logger, capture) = test_logger();

        logger.info("Scalar attribute", json!(42));
        logger.shipper().flush().await;

        assert_eq!(capture.records()[0].attributes()["value"], 42);
    }
}

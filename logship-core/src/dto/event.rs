//! Producer-side log event
//!
//! A `LogEvent` is what the serving layer hands to the shipper. It has no
//! timestamp or resource; those are assigned when the shipper stamps it into a
//! [`LogRecord`](crate::LogRecord).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::record::Severity;

/// Upper bound on a message, in bytes
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Upper bound on producer-supplied attributes per event
pub const MAX_ATTRIBUTES: usize = 128;

/// Log event submitted by a producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// Reasons an event is rejected at submit time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("log message is empty")]
    EmptyMessage,

    #[error("log message too long ({len} bytes, max: {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("attribute keys must not be empty")]
    EmptyAttributeKey,

    #[error("too many attributes ({count}, max: {max})")]
    TooManyAttributes { count: usize, max: usize },
}

impl LogEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            attributes: Map::new(),
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Adds one attribute, replacing any previous value under `key`
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Appends every entry of `attributes`, in order
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Checks the event is structurally valid for shipping
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.message.trim().is_empty() {
            return Err(RecordError::EmptyMessage);
        }

        if self.message.len() > MAX_MESSAGE_LENGTH {
            return Err(RecordError::MessageTooLong {
                len: self.message.len(),
                max: MAX_MESSAGE_LENGTH,
            });
        }

        if self.attributes.len() > MAX_ATTRIBUTES {
            return Err(RecordError::TooManyAttributes {
                count: self.attributes.len(),
                max: MAX_ATTRIBUTES,
            });
        }

        if self.attributes.keys().any(|key| key.is_empty()) {
            return Err(RecordError::EmptyAttributeKey);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_valid_event() {
        let event =
            LogEvent::info("Home route accessed").with_attribute("customField", "test value");
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_message() {
        assert_eq!(
            LogEvent::info("   ").validate(),
            Err(RecordError::EmptyMessage)
        );
    }

    #[test]
    fn test_validate_message_too_long() {
        let event = LogEvent::info("x".repeat(MAX_MESSAGE_LENGTH + 1));
        assert!(matches!(
            event.validate(),
            Err(RecordError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_validate_empty_attribute_key() {
        let event = LogEvent::info("hello").with_attribute("", 1);
        assert_eq!(event.validate(), Err(RecordError::EmptyAttributeKey));
    }

    #[test]
    fn test_validate_too_many_attributes() {
        let attributes = (0..=MAX_ATTRIBUTES)
            .map(|i| (format!("key{}", i), json!(i)))
            .collect();
        let event = LogEvent::info("hello").with_attributes(attributes);

        assert!(matches!(
            event.validate(),
            Err(RecordError::TooManyAttributes { .. })
        ));
    }

    #[test]
    fn test_with_attributes_keeps_insertion_order() {
        let mut extra = Map::new();
        extra.insert("zeta".to_string(), json!(1));
        extra.insert("alpha".to_string(), json!(2));

        let event = LogEvent::debug("ordered").with_attributes(extra);

        let keys: Vec<&str> = event.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}

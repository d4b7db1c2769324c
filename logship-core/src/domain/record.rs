//! Log record domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::resource::Resource;
use crate::dto::event::LogEvent;

/// A single log event as shipped to the ingestion endpoint
///
/// Records are stamped by the shipper when a producer submits a [`LogEvent`]
/// and are never mutated afterwards. Only their placement in the buffer changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(with = "crate::domain::timestamp")]
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: String,
    attributes: Map<String, Value>,
    resource: Resource,
}

/// Log severity, serialized upper-case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogRecord {
    /// Stamps a producer event into a record
    ///
    /// Attributes start with the fixed `service` and `environment` fields taken
    /// from `resource`, followed by the event's own attributes in insertion order.
    /// An event attribute with the same key replaces the fixed value.
    pub fn new(event: LogEvent, resource: &Resource, timestamp: DateTime<Utc>) -> Self {
        let mut attributes = Map::with_capacity(event.attributes.len() + 2);
        attributes.insert(
            "service".to_string(),
            Value::String(resource.service_name.clone()),
        );
        attributes.insert(
            "environment".to_string(),
            Value::String(resource.environment.clone()),
        );
        attributes.extend(event.attributes);

        Self {
            timestamp,
            severity: event.severity,
            message: event.message,
            attributes,
            resource: resource.clone(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

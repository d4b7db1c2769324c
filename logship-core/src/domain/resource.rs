//! Resource identifying the emitting service

use serde::{Deserialize, Serialize};

/// Fixed identity of the service emitting records
///
/// Built once from configuration and attached to every record for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "service.name")]
    pub service_name: String,
    #[serde(rename = "service.environment")]
    pub environment: String,
}

impl Resource {
    pub fn new(service_name: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            environment: environment.into(),
        }
    }
}

//! Batch of records taken from the buffer for one export attempt

use serde::{Deserialize, Serialize};

use crate::domain::record::LogRecord;

/// Immutable, ordered snapshot of records
///
/// Serializes as a bare JSON array, which is the request body the ingestion
/// endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch {
    records: Vec<LogRecord>,
}

impl Batch {
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gives the records back, e.g. to requeue them after a failed export
    pub fn into_records(self) -> Vec<LogRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogEvent, Resource};

    #[test]
    fn test_batch_serializes_as_array() {
        let resource = Resource::new("svc", "test");
        let batch = Batch::new(vec![
            LogRecord::new(LogEvent::info("first"), &resource, chrono::Utc::now()),
            LogRecord::new(LogEvent::info("second"), &resource, chrono::Utc::now()),
        ]);

        let json = serde_json::to_value(&batch).unwrap();

        let items = json.as_array().expect("batch should be an array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["message"], "first");
        assert_eq!(items[1]["message"], "second");
    }
}

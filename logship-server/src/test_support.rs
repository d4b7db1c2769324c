//! Shared helpers for tests

use async_trait::async_trait;
use logship_core::{Batch, LogRecord, Resource};
use logship_shipper::{LogExporter, LogShipper, ShipperConfig};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::AppState;
use crate::logger::AppLogger;

/// Exporter that keeps every record it is given
#[derive(Default)]
pub struct CaptureExporter {
    records: Mutex<Vec<LogRecord>>,
}

impl CaptureExporter {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records()
            .iter()
            .map(|record| record.message().to_string())
            .collect()
    }
}

#[async_trait]
impl LogExporter for CaptureExporter {
    async fn export(&self, batch: &Batch) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap()
            .extend(batch.records().iter().cloned());
        Ok(())
    }
}

pub fn test_logger() -> (AppLogger, Arc<CaptureExporter>) {
    let config = ShipperConfig::new("test-token", Resource::new("logship-demo", "test"))
        .with_endpoint("http://localhost:4318/v1/logs")
        .with_max_batch_delay(Duration::from_secs(60));

    let capture = Arc::new(CaptureExporter::default());
    let shipper = LogShipper::new(config, capture.clone()).unwrap();

    (AppLogger::new(shipper), capture)
}

pub fn test_state() -> (AppState, Arc<CaptureExporter>) {
    let (logger, capture) = test_logger();
    (AppState::new(logger), capture)
}

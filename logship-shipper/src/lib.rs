//! Logship Shipper
//!
//! Batches log records in memory and ships them to a log ingestion endpoint.
//!
//! Architecture:
//! - Buffer: ordered queue of records waiting for a flush
//! - Flush timer: at most one delayed flush pending per shipper
//! - Exporter: sends one batch per request; failed batches go back to the
//!   front of the buffer until they reach the attempt limit
//! - Drain: one final flush at shutdown, awaited by the caller
//!
//! # Example
//!
//! ```no_run
//! use logship_core::{LogEvent, Resource};
//! use logship_shipper::{LogShipper, ShipperConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ShipperConfig::new("token", Resource::new("checkout", "production"));
//!     let shipper = LogShipper::with_http(config)?;
//!
//!     shipper.submit(LogEvent::info("Server started").with_attribute("port", 3000))?;
//!
//!     shipper.drain().await;
//!     Ok(())
//! }
//! ```

mod buffer;
pub mod config;
pub mod error;
mod exporter;
mod shipper;
mod stats;
mod timer;

pub use config::ShipperConfig;
pub use error::{ConfigError, SubmitError};
pub use exporter::LogExporter;
pub use shipper::{FlushOutcome, LogShipper};
pub use stats::ShipperStats;

//! Logship Core
//!
//! Core types shared by the logship crates.
//!
//! This crate contains:
//! - Domain types: the records that travel to the ingestion endpoint (LogRecord, Batch, etc.)
//! - DTOs: what producers hand to the shipper before it is stamped into a record

pub mod domain;
pub mod dto;

pub use domain::batch::Batch;
pub use domain::record::{LogRecord, Severity};
pub use domain::resource::Resource;
pub use dto::event::{LogEvent, RecordError};

//! Core domain types
//!
//! These types are built by the shipper and serialized unchanged by the client,
//! so their serde shape is the wire format of the ingestion endpoint.

pub mod batch;
pub mod record;
pub mod resource;
pub(crate) mod timestamp;

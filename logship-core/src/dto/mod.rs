//! Data transfer objects
//!
//! Types handed from producers to the shipper.

pub mod event;

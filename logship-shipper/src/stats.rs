//! Shipper counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the shipper counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipperStats {
    /// Events accepted by `submit`
    pub submitted: u64,
    /// Records delivered by successful exports
    pub exported: u64,
    /// Export attempts that failed
    pub export_failures: u64,
    /// Records put back at the front of the buffer after a failure
    pub requeued: u64,
    /// Records dropped after reaching the attempt limit
    pub dropped: u64,
    /// Delayed flush timers armed
    pub timers_armed: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub submitted: AtomicU64,
    pub exported: AtomicU64,
    pub export_failures: AtomicU64,
    pub requeued: AtomicU64,
    pub dropped: AtomicU64,
    pub timers_armed: AtomicU64,
}

impl Counters {
    pub fn add(counter: &AtomicU64, value: usize) {
        counter.fetch_add(value as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ShipperStats {
        ShipperStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            exported: self.exported.load(Ordering::Relaxed),
            export_failures: self.export_failures.load(Ordering::Relaxed),
            requeued: self.requeued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            timers_armed: self.timers_armed.load(Ordering::Relaxed),
        }
    }
}

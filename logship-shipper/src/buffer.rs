//! In-memory record buffer
//!
//! Ordered queue of records waiting for a flush. Each entry remembers how many
//! export attempts it already went through so the retry limit can be applied
//! when a batch is requeued.

use logship_core::LogRecord;
use std::collections::VecDeque;

/// A buffered record and its failed export attempts so far
#[derive(Debug, Clone)]
pub(crate) struct Pending {
    pub record: LogRecord,
    pub attempts: u32,
}

#[derive(Debug, Default)]
pub(crate) struct LogBuffer {
    entries: VecDeque<Pending>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fresh record at the tail
    pub fn push(&mut self, record: LogRecord) {
        self.entries.push_back(Pending {
            record,
            attempts: 0,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns every entry, oldest first
    pub fn take(&mut self) -> Vec<Pending> {
        self.entries.drain(..).collect()
    }

    /// Puts `entries` back at the head, keeping their order, ahead of
    /// everything buffered since they were taken
    pub fn requeue_front(&mut self, entries: Vec<Pending>) {
        for entry in entries.into_iter().rev() {
            self.entries.push_front(entry);
        }
    }
}

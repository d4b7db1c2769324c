//! Delayed flush timer
//!
//! Holds at most one pending timer. Each armed timer gets a fresh id; when it
//! fires it must [`claim`](FlushTimer::claim) its id before flushing, so a flush
//! that already cancelled it (or a newer timer) wins.

use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

pub(crate) type TimerId = u64;

#[derive(Debug)]
struct PendingTimer {
    id: TimerId,
    handle: AbortHandle,
}

#[derive(Debug, Default)]
pub(crate) struct FlushTimer {
    pending: Option<PendingTimer>,
    next_id: TimerId,
}

impl FlushTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules `on_fire` to run after `delay`
    ///
    /// Returns false without scheduling anything if a timer is already pending.
    pub fn arm<F, Fut>(&mut self, runtime: &Handle, delay: Duration, on_fire: F) -> bool
    where
        F: FnOnce(TimerId) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.pending.is_some() {
            return false;
        }

        let id = self.next_id;
        self.next_id += 1;

        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(id).await;
        });

        self.pending = Some(PendingTimer {
            id,
            handle: task.abort_handle(),
        });
        true
    }

    /// Aborts the pending timer, if any
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Called by a fired timer; clears the slot without aborting if `id` still owns it
    pub fn claim(&mut self, id: TimerId) -> bool {
        match &self.pending {
            Some(timer) if timer.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

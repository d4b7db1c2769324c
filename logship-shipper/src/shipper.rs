//! Batching log shipper
//!
//! Producers call [`LogShipper::submit`], which stamps the event into a record
//! and appends it to the buffer without waiting on the network. A batch is cut
//! when the buffer reaches `max_batch_size` or when the delayed flush timer
//! fires, and is handed to the exporter on a spawned task.
//!
//! Two locks are involved:
//! - `state` (sync) guards the buffer, the timer slot and the closed flag.
//!   It is never held across an `.await`.
//! - `export_gate` (async) is held from snapshot to the end of the export and
//!   its requeue, so at most one batch is in flight and a failed batch is back
//!   in the buffer before the next snapshot is taken.

use chrono::Utc;
use logship_client::IngestClient;
use logship_core::{Batch, LogEvent, LogRecord};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, error, info, warn};

use crate::buffer::{LogBuffer, Pending};
use crate::config::ShipperConfig;
use crate::error::{ConfigError, SubmitError};
use crate::exporter::LogExporter;
use crate::stats::{Counters, ShipperStats};
use crate::timer::{FlushTimer, TimerId};

/// Result of one flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The buffer was empty; nothing was sent
    Empty,
    /// The batch was accepted by the endpoint
    Delivered { records: usize },
    /// The export failed; `requeued` records went back to the buffer and
    /// `dropped` records reached the attempt limit
    Failed { requeued: usize, dropped: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlushTrigger {
    Size,
    Timer,
    Manual,
    Shutdown,
}

/// Buffers log records and ships them in batches
///
/// Cloning is cheap; clones share the same buffer.
#[derive(Clone)]
pub struct LogShipper {
    inner: Arc<Inner>,
}

struct Inner {
    config: ShipperConfig,
    exporter: Arc<dyn LogExporter>,
    state: Mutex<State>,
    export_gate: Arc<AsyncMutex<()>>,
    runtime: Handle,
    counters: Counters,
}

struct State {
    buffer: LogBuffer,
    timer: FlushTimer,
    /// A size-triggered flush is already waiting behind an in-flight export
    size_flush_queued: bool,
    closed: bool,
}

struct Snapshot {
    batch: Batch,
    attempts: Vec<u32>,
}

impl LogShipper {
    /// Creates a shipper sending batches through `exporter`
    ///
    /// Must be called from within a Tokio runtime; flushes and timers are
    /// spawned on it.
    pub fn new(config: ShipperConfig, exporter: Arc<dyn LogExporter>) -> Result<Self, ConfigError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;

        info!(
            "Log shipper ready: endpoint={}, batch_size={}, batch_delay={:?}, max_attempts={}",
            config.endpoint, config.max_batch_size, config.max_batch_delay, config.max_attempts
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                exporter,
                state: Mutex::new(State {
                    buffer: LogBuffer::new(),
                    timer: FlushTimer::new(),
                    size_flush_queued: false,
                    closed: false,
                }),
                export_gate: Arc::new(AsyncMutex::new(())),
                runtime,
                counters: Counters::default(),
            }),
        })
    }

    /// Creates a shipper posting to `config.endpoint` over HTTP
    pub fn with_http(config: ShipperConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = IngestClient::with_timeout(
            config.endpoint.clone(),
            config.access_token.clone(),
            config.request_timeout,
        )
        .map_err(ConfigError::HttpClient)?;

        Self::new(config, Arc::new(client))
    }

    /// Accepts one event for shipping
    ///
    /// Never waits on the network. Only validation failures and submissions
    /// after [`drain`](Self::drain) are reported; export failures are not.
    pub fn submit(&self, event: LogEvent) -> Result<(), SubmitError> {
        self.inner.submit(event)
    }

    /// Sends everything currently buffered as one batch
    ///
    /// Waits for an in-flight export to settle first. A no-op on an empty buffer.
    pub async fn flush(&self) -> FlushOutcome {
        self.inner.flush(FlushTrigger::Manual).await
    }

    /// Final flush at shutdown
    ///
    /// Stops accepting events, cancels the pending timer and performs exactly
    /// one flush, returning once its export has completed. Records that fail
    /// this last export stay in memory and are lost when the process exits.
    ///
    /// A size or timer flush already waiting on an in-flight export runs
    /// before this one and may ship the remaining records itself; the drain
    /// then reports [`FlushOutcome::Empty`]. A batch that flush failed to send
    /// is requeued and picked up here.
    pub async fn drain(&self) -> FlushOutcome {
        {
            let mut state = self.inner.lock_state();
            state.closed = true;
            state.timer.cancel();
        }

        info!("Draining log shipper");

        let outcome = self.inner.flush(FlushTrigger::Shutdown).await;
        match outcome {
            FlushOutcome::Empty => {
                info!("Log shipper drained, nothing left after earlier flushes")
            }
            FlushOutcome::Delivered { records } => {
                info!("Log shipper drained, delivered {} log records", records)
            }
            FlushOutcome::Failed { requeued, dropped } => error!(
                "Final log export failed, abandoning {} log records",
                requeued + dropped
            ),
        }

        outcome
    }

    /// Number of records waiting in the buffer
    pub fn buffered_len(&self) -> usize {
        self.inner.lock_state().buffer.len()
    }

    /// Whether a delayed flush is scheduled
    pub fn has_pending_timer(&self) -> bool {
        self.inner.lock_state().timer.is_pending()
    }

    /// Whether [`drain`](Self::drain) has been called
    pub fn is_closed(&self) -> bool {
        self.inner.lock_state().closed
    }

    pub fn stats(&self) -> ShipperStats {
        self.inner.counters.snapshot()
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn submit(self: &Arc<Self>, event: LogEvent) -> Result<(), SubmitError> {
        event.validate()?;

        let mut state = self.lock_state();
        if state.closed {
            return Err(SubmitError::Closed);
        }

        // Stamped under the lock so timestamps follow buffer order
        let record = LogRecord::new(event, &self.config.resource, Utc::now());
        state.buffer.push(record);
        Counters::add(&self.counters.submitted, 1);

        if state.buffer.len() >= self.config.max_batch_size {
            self.trigger_size_flush(&mut state);
        } else if !state.timer.is_pending() {
            self.arm_timer(&mut state);
        }

        Ok(())
    }

    /// Cuts a batch right away if nothing is in flight, otherwise queues one
    /// flush behind the in-flight export
    fn trigger_size_flush(self: &Arc<Self>, state: &mut State) {
        match Arc::clone(&self.export_gate).try_lock_owned() {
            Ok(gate) => {
                if let Some(snapshot) = take_snapshot(state) {
                    let inner = Arc::clone(self);
                    self.runtime.spawn(async move {
                        inner.ship(gate, snapshot, FlushTrigger::Size).await;
                    });
                }
            }
            Err(_) => {
                if !state.size_flush_queued {
                    state.size_flush_queued = true;
                    let inner = Arc::clone(self);
                    self.runtime.spawn(async move {
                        inner.flush(FlushTrigger::Size).await;
                    });
                }
            }
        }
    }

    fn arm_timer(self: &Arc<Self>, state: &mut State) {
        let inner = Arc::downgrade(self);
        let delay = self.config.max_batch_delay;

        let armed = state.timer.arm(&self.runtime, delay, move |id| async move {
            if let Some(inner) = inner.upgrade() {
                inner.on_timer(id).await;
            }
        });

        if armed {
            Counters::add(&self.counters.timers_armed, 1);
            debug!("Armed flush timer ({:?})", delay);
        }
    }

    async fn on_timer(self: Arc<Self>, id: TimerId) {
        let claimed = self.lock_state().timer.claim(id);
        if claimed {
            self.flush(FlushTrigger::Timer).await;
        }
    }

    async fn flush(self: &Arc<Self>, trigger: FlushTrigger) -> FlushOutcome {
        let gate = Arc::clone(&self.export_gate).lock_owned().await;

        let snapshot = {
            let mut state = self.lock_state();
            if trigger == FlushTrigger::Size {
                state.size_flush_queued = false;
            }
            take_snapshot(&mut state)
        };

        match snapshot {
            Some(snapshot) => self.ship(gate, snapshot, trigger).await,
            None => FlushOutcome::Empty,
        }
    }

    /// Exports one snapshot; the caller's `gate` is released when this returns
    async fn ship(
        self: &Arc<Self>,
        _gate: OwnedMutexGuard<()>,
        snapshot: Snapshot,
        trigger: FlushTrigger,
    ) -> FlushOutcome {
        let count = snapshot.batch.len();
        debug!("Flushing {} log records ({:?})", count, trigger);

        match self.exporter.export(&snapshot.batch).await {
            Ok(()) => {
                Counters::add(&self.counters.exported, count);
                debug!("Exported {} log records", count);
                FlushOutcome::Delivered { records: count }
            }
            Err(e) => {
                Counters::add(&self.counters.export_failures, 1);
                warn!("Failed to export {} log records: {:#}", count, e);
                let (requeued, dropped) = self.requeue(snapshot);
                FlushOutcome::Failed { requeued, dropped }
            }
        }
    }

    /// Puts a failed batch back at the head of the buffer
    ///
    /// Records that used up their attempts are dropped. If anything was
    /// requeued and no timer is pending, one is armed so the retry happens
    /// after `max_batch_delay` even without new submissions.
    fn requeue(self: &Arc<Self>, snapshot: Snapshot) -> (usize, usize) {
        let max_attempts = self.config.max_attempts;
        let mut retained = Vec::with_capacity(snapshot.batch.len());
        let mut dropped = 0;

        for (record, attempts) in snapshot
            .batch
            .into_records()
            .into_iter()
            .zip(snapshot.attempts)
        {
            let attempts = attempts + 1;
            if attempts >= max_attempts {
                dropped += 1;
            } else {
                retained.push(Pending { record, attempts });
            }
        }

        let requeued = retained.len();
        {
            let mut state = self.lock_state();
            state.buffer.requeue_front(retained);
            if !state.closed && !state.buffer.is_empty() && !state.timer.is_pending() {
                self.arm_timer(&mut state);
            }
        }

        Counters::add(&self.counters.requeued, requeued);
        Counters::add(&self.counters.dropped, dropped);

        if requeued > 0 {
            debug!("Requeued {} log records", requeued);
        }
        if dropped > 0 {
            error!(
                "Dropped {} log records after {} failed export attempts",
                dropped, max_attempts
            );
        }

        (requeued, dropped)
    }
}

/// Takes the whole buffer and cancels the pending timer; `None` if empty
fn take_snapshot(state: &mut State) -> Option<Snapshot> {
    if state.buffer.is_empty() {
        return None;
    }

    state.timer.cancel();

    let (records, attempts): (Vec<LogRecord>, Vec<u32>) = state
        .buffer
        .take()
        .into_iter()
        .map(|pending| (pending.record, pending.attempts))
        .unzip();

    Some(Snapshot {
        batch: Batch::new(records),
        attempts,
    })
}

//! Ingestion queue: producer handle and the drain worker.

use std::sync::{Arc, PoisonError};

use tokio::sync::{mpsc, watch};

use statline_core::error::{Result, StatError};
use statline_core::CounterTable;

use crate::engine::Shared;

/// One raw event on its way to the counters.
#[derive(Debug)]
pub(crate) struct StatEvent {
    group: String,
    key: String,
    value: i64,
}

/// Producer handle for the ingestion queue. Cheap to clone.
///
/// Recording never touches aggregation state; it only enqueues. A full queue
/// makes the caller wait, which is the engine's only admission control.
#[derive(Clone)]
pub struct Recorder {
    tx: mpsc::Sender<StatEvent>,
}

impl Recorder {
    pub(crate) fn new(tx: mpsc::Sender<StatEvent>) -> Self {
        Self { tx }
    }

    /// Enqueue an event, waiting for queue space.
    ///
    /// `Ok` means queued, not folded: events still queued when the engine
    /// stops are discarded.
    pub async fn record(&self, group: &str, key: &str, value: i64) -> Result<()> {
        self.tx
            .send(StatEvent {
                group: group.to_string(),
                key: key.to_string(),
                value,
            })
            .await
            .map_err(|_| StatError::Stopped)
    }

    /// Blocking variant for plain threads.
    ///
    /// Must not be called from inside an async context (tokio panics on
    /// `blocking_send` there); use [`Recorder::record`] instead.
    pub fn record_blocking(&self, group: &str, key: &str, value: i64) -> Result<()> {
        self.tx
            .blocking_send(StatEvent {
                group: group.to_string(),
                key: key.to_string(),
                value,
            })
            .map_err(|_| StatError::Stopped)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Drain worker: folds queued events into `current` counters in bounded batches.
///
/// Each wake takes one event, reads the queue length at that instant and folds
/// exactly that many more under a single acquisition of the counters lock.
/// Events enqueued while the batch runs wait for the next wake.
pub(crate) async fn drain(
    mut rx: mpsc::Receiver<StatEvent>,
    shared: Arc<Shared>,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!("drain worker started");

    loop {
        let first = tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => break,
            ev = rx.recv() => match ev {
                Some(ev) => ev,
                None => break,
            },
        };

        let pending = rx.len();
        let mut folded: u64 = 0;
        let mut misses: u64 = 0;
        let mut first_miss: Option<StatError> = None;

        {
            let mut current = shared.counters.lock().unwrap_or_else(PoisonError::into_inner);
            let mut fold = |ev: StatEvent, current: &mut CounterTable| {
                match current.apply(&ev.group, &ev.key, ev.value) {
                    Ok(()) => folded += 1,
                    Err(e) => {
                        misses += 1;
                        first_miss.get_or_insert(e);
                    }
                }
            };

            fold(first, &mut *current);
            for _ in 0..pending {
                match rx.try_recv() {
                    Ok(ev) => fold(ev, &mut *current),
                    Err(_) => break,
                }
            }
        }

        shared.metrics.events_ingested.add(folded);
        shared.metrics.drain_batches.inc();
        if misses > 0 {
            shared.metrics.unregistered_dropped.add(misses);
            if let Some(e) = first_miss {
                tracing::warn!(error = %e, dropped = misses, "events for unregistered keys dropped");
            }
        }
    }

    tracing::info!("drain worker stopped");
}

//! Bounded, lossy completion signal.

use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::time::timeout;

/// Best-effort "something happened" channel.
///
/// Delivery is at most once: `signal` gives up after the caller's timeout and
/// drops the value. Consumers use it to avoid polling a snapshot, never to
/// count events.
pub struct CompletionSignal<T> {
    tx: mpsc::Sender<T>,
    rx: Mutex<mpsc::Receiver<T>>,
    closed: watch::Sender<bool>,
}

impl<T> CompletionSignal<T> {
    /// `capacity` values may be buffered before `signal` starts waiting.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (closed, _) = watch::channel(false);
        Self {
            tx,
            rx: Mutex::new(rx),
            closed,
        }
    }

    /// Hand off `value`, waiting at most `wait` for buffer space.
    /// Returns `false` when the value was dropped.
    pub async fn signal(&self, value: T, wait: Duration) -> bool {
        if self.is_closed() {
            return false;
        }
        let value = match self.tx.try_send(value) {
            Ok(()) => return true,
            Err(mpsc::error::TrySendError::Full(v)) => v,
            Err(mpsc::error::TrySendError::Closed(_)) => return false,
        };
        if wait.is_zero() {
            return false;
        }
        matches!(timeout(wait, self.tx.send(value)).await, Ok(Ok(())))
    }

    /// Next signalled value, or `None` once the signal is closed.
    ///
    /// Values still buffered at close time are discarded.
    pub async fn wait(&self) -> Option<T> {
        let mut closed = self.closed.subscribe();
        if *closed.borrow() {
            return None;
        }
        tokio::select! {
            biased;
            _ = closed.wait_for(|c| *c) => None,
            v = async { self.rx.lock().await.recv().await } => v,
        }
    }

    /// [`CompletionSignal::wait`] bounded by `limit`. `None` on timeout or
    /// close.
    pub async fn wait_timeout(&self, limit: Duration) -> Option<T> {
        timeout(limit, self.wait()).await.ok().flatten()
    }

    /// Mark closed; pending and future `wait` calls return `None`.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

//! Reducer task and its tick scheduling.

use std::sync::{Arc, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{sleep, Instant};

use statline_core::{CounterTable, Window};

use crate::engine::Shared;
use crate::notify::{CompletionSignal, TickEvent};

/// Reducer settings taken from the engine section at start.
#[derive(Clone)]
pub(crate) struct ReducerConfig {
    pub(crate) interval: Duration,
    pub(crate) signal: Option<Arc<CompletionSignal<TickEvent>>>,
    pub(crate) signal_timeout: Duration,
}

/// Timer-driven reducer.
///
/// `tick_start` and `previous` are owned by this task alone; only the copy out
/// of `current` takes the counters lock. Elapsed time comes from the monotonic
/// clock.
pub(crate) async fn run(
    shared: Arc<Shared>,
    cfg: ReducerConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut tick_start = CounterTable::new();
    let mut previous = CounterTable::new();
    let mut last = Instant::now();
    let mut wait = cfg.interval;
    let mut seq: u64 = 0;

    tracing::info!(interval_ms = cfg.interval.as_millis() as u64, "reducer started");

    loop {
        tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => break,
            _ = sleep(wait) => {}
        }

        let started = Instant::now();
        {
            let current = shared.counters.lock().unwrap_or_else(PoisonError::into_inner);
            tick_start.copy_from(&current);
        }

        let elapsed = started.duration_since(last);
        let window = Window {
            tick_start: &tick_start,
            previous: &previous,
            elapsed_secs: elapsed.as_secs_f64(),
        };

        let published = {
            let mut registry = shared.registry.write().unwrap_or_else(PoisonError::into_inner);
            match registry.reduce(&window) {
                Some(lines) => {
                    let groups = lines.len();
                    shared.text.publish(lines);
                    Some(groups)
                }
                None => None,
            }
        };

        let Some(groups) = published else {
            shared.metrics.ticks_skipped.inc();
            tracing::debug!("zero-length window, tick skipped");
            continue;
        };

        last = started;
        previous.copy_from(&tick_start);
        seq += 1;
        shared.metrics.ticks_completed.inc();
        tracing::trace!(tick = seq, groups, elapsed_ms = elapsed.as_millis() as u64, "tick published");

        if let Some(signal) = &cfg.signal {
            let event = TickEvent { tick: seq, elapsed };
            if !signal.signal(event, cfg.signal_timeout).await {
                shared.metrics.signals_dropped.inc();
                tracing::debug!(tick = seq, "completion signal dropped");
            }
        }

        wait = next_wait(cfg.interval, started.elapsed());
    }

    tracing::info!(ticks = seq, "reducer stopped");
}

/// Delay before the next tick: the interval minus the time this tick spent.
/// An overrun yields zero, so the next tick fires immediately.
pub fn next_wait(interval: Duration, spent: Duration) -> Duration {
    interval.saturating_sub(spent)
}

//! Engine self-metrics.
//!
//! Plain atomics, rendered in Prometheus text exposition format so an outer
//! process can expose them next to its own metrics.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, v: u64) {
        self.0.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let _ = writeln!(out, "{} {}", name, self.get());
    }
}

#[derive(Default)]
pub struct EngineMetrics {
    pub events_ingested: Counter,
    pub drain_batches: Counter,
    pub unregistered_dropped: Counter,
    pub ticks_completed: Counter,
    pub ticks_skipped: Counter,
    pub signals_dropped: Counter,
}

impl EngineMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.events_ingested.render("statline_events_ingested_total", &mut out);
        self.drain_batches.render("statline_drain_batches_total", &mut out);
        self.unregistered_dropped.render("statline_unregistered_dropped_total", &mut out);
        self.ticks_completed.render("statline_ticks_completed_total", &mut out);
        self.ticks_skipped.render("statline_ticks_skipped_total", &mut out);
        self.signals_dropped.render("statline_signals_dropped_total", &mut out);
        out
    }
}

//! Engine lifecycle and query surface.
//!
//! Ownership zones, each behind its own lock:
//! - counters: `current` cumulative values (drain worker, reducer's tick-start copy, registration)
//! - registry: keys, result tables and watch series (registration, reducer, structured/watch reads)
//! - text: published per-group lines (reducer, text reads)
//!
//! Lock order is registry -> counters and registry -> text. The drain worker
//! and the reducer's copy step take the counters lock alone.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use statline_core::error::{Result, StatError};
use statline_core::{CounterTable, MetricKey, Registry, Structured};

use crate::config::EngineSection;
use crate::ingest::{self, Recorder};
use crate::notify::{CompletionSignal, TickEvent};
use crate::obs::EngineMetrics;
use crate::reduce::{self, ReducerConfig};
use crate::snapshot::SnapshotStore;

pub(crate) struct Shared {
    pub(crate) counters: Mutex<CounterTable>,
    pub(crate) registry: RwLock<Registry>,
    pub(crate) text: SnapshotStore,
    pub(crate) metrics: EngineMetrics,
}

pub struct StatEngine {
    shared: Arc<Shared>,
    recorder: Recorder,
    shutdown: watch::Sender<bool>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl StatEngine {
    /// Validate `cfg`, then spawn the drain worker and the reducer on the
    /// current tokio runtime.
    ///
    /// `signal`, when given, receives a `TickEvent` after every published tick.
    pub fn start(
        cfg: &EngineSection,
        signal: Option<Arc<CompletionSignal<TickEvent>>>,
    ) -> Result<Arc<Self>> {
        cfg.validate()?;
        let rt = tokio::runtime::Handle::try_current()
            .map_err(|e| StatError::Internal(format!("no tokio runtime: {e}")))?;

        let shared = Arc::new(Shared {
            counters: Mutex::new(CounterTable::new()),
            registry: RwLock::new(Registry::new().with_watch(cfg.watch)),
            text: SnapshotStore::new(),
            metrics: EngineMetrics::default(),
        });

        let queue_capacity = cfg.effective_queue_capacity();
        let (tx, rx) = mpsc::channel(queue_capacity);
        let (shutdown, _) = watch::channel(false);

        let drain = rt.spawn(ingest::drain(rx, Arc::clone(&shared), shutdown.subscribe()));
        let reducer = rt.spawn(reduce::run(
            Arc::clone(&shared),
            ReducerConfig {
                interval: cfg.interval(),
                signal,
                signal_timeout: cfg.signal_timeout(),
            },
            shutdown.subscribe(),
        ));

        tracing::info!(
            interval_ms = cfg.interval_ms,
            queue_capacity,
            watch = cfg.watch,
            "statline engine started"
        );

        Ok(Arc::new(Self {
            shared,
            recorder: Recorder::new(tx),
            shutdown,
            workers: Mutex::new(vec![drain, reducer]),
        }))
    }

    /// Register a metric key. Returns `false` when the name already exists in
    /// its group (the first registration's kinds stay in effect).
    ///
    /// Keys registered mid-run join the computation from the next tick.
    pub fn register(&self, key: MetricKey) -> Result<bool> {
        let mut registry = self.shared.registry.write().unwrap_or_else(PoisonError::into_inner);
        let Some(stored) = registry.register(key)? else {
            return Ok(false);
        };

        self.shared
            .counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .declare(&stored.group, &stored.name, stored.is_gauge());
        self.shared.text.ensure_group(&stored.group);
        Ok(true)
    }

    /// Enqueue one event. Events for keys that were never registered are
    /// dropped by the drain worker (logged and counted).
    pub async fn record(&self, group: &str, key: &str, value: i64) -> Result<()> {
        self.recorder.record(group, key, value).await
    }

    /// Blocking variant of [`StatEngine::record`] for non-async threads.
    pub fn record_blocking(&self, group: &str, key: &str, value: i64) -> Result<()> {
        self.recorder.record_blocking(group, key, value)
    }

    /// Producer handle that can be moved into other tasks or threads.
    pub fn recorder(&self) -> Recorder {
        self.recorder.clone()
    }

    /// Last published line of every known group, sorted by group name.
    /// Groups that have not been computed yet yield an empty string.
    pub fn text_lines(&self) -> Vec<String> {
        self.shared.text.lines()
    }

    /// `group -> kind -> display name -> value`, rate values truncated.
    pub fn structured(&self) -> Structured {
        self.shared
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .structured()
    }

    pub fn structured_json(&self) -> Result<String> {
        serde_json::to_string(&self.structured())
            .map_err(|e| StatError::Serialization(e.to_string()))
    }

    /// Watch samples, oldest first. Unknown series read as empty.
    pub fn read_series(&self, group: &str, display: &str) -> Vec<f64> {
        self.shared
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .series(group, display)
            .map(|s| s.samples())
            .unwrap_or_default()
    }

    pub fn groups(&self) -> Vec<String> {
        self.shared
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .groups()
            .map(str::to_string)
            .collect()
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.shared.metrics
    }

    /// Ask both workers to exit at their next wake point. In-flight work
    /// finishes first; events still queued at that point are discarded.
    pub fn stop(&self) {
        if !self.shutdown.send_replace(true) {
            tracing::info!("statline engine stopping");
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Wait for the workers after [`StatEngine::stop`].
    pub async fn join(&self) {
        let workers: Vec<JoinHandle<()>> = {
            let mut guard = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
            guard.drain(..).collect()
        };
        for w in workers {
            if let Err(e) = w.await {
                tracing::warn!(error = %e, "statline worker ended abnormally");
            }
        }
    }
}

impl Drop for StatEngine {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

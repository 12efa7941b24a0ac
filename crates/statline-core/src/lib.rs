//! statline core: runtime-free primitives of the counter/rate aggregation engine.
//!
//! This crate owns the key registry, the cumulative counter tables, the window
//! reduction math and the bounded watch series. It carries no runtime
//! dependencies; locking, timers and the ingestion queue live in
//! `statline-engine`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `StatError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counters;
pub mod error;
pub mod key;
pub mod registry;
pub mod watch;
pub mod window;

pub use counters::CounterTable;
pub use error::{ErrorCode, Result, StatError};
pub use key::{MetricKey, ReductionKind, ReductionMask};
pub use registry::{Registry, ResultTable, Sample, Structured};
pub use watch::{WatchSeries, WATCH_CAPACITY};
pub use window::{GroupLine, Window};

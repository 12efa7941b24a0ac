//! statline engine library entry.
//!
//! This crate wires the runtime side of the aggregation engine: the ingestion
//! queue and its drain worker, the timer-driven reducer, the completion signal
//! and the published snapshots. It is consumed by the demo binary (`main.rs`)
//! and by integration tests.

pub mod config;
pub mod engine;
pub mod ingest;
pub mod notify;
pub mod obs;
pub mod reduce;
pub mod snapshot;

pub use engine::StatEngine;
pub use ingest::Recorder;
pub use notify::{CompletionSignal, TickEvent};

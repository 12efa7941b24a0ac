//! Ingestion queue and drain worker.

pub mod queue;

pub(crate) use queue::drain;
pub use queue::Recorder;

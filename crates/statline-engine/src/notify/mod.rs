//! Tick completion notification.

pub mod signal;

use std::time::Duration;

pub use signal::CompletionSignal;

/// Payload sent after every published tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickEvent {
    /// Sequence number of the computed tick, starting at 1.
    pub tick: u64,
    /// Window length the tick was computed over.
    pub elapsed: Duration,
}

//! Observability: tracing setup and engine self-metrics.

pub mod metrics;

use tracing_subscriber::{fmt, EnvFilter};

pub use metrics::EngineMetrics;

/// Install the fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

//! Periodic windowed reducer.

pub mod worker;

pub(crate) use worker::{run, ReducerConfig};
pub use worker::next_wait;

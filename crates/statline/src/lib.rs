//! Top-level facade crate for statline.
//!
//! Re-exports core types and the engine so users can depend on a single crate.

pub mod core {
    pub use statline_core::*;
}

pub mod engine {
    pub use statline_engine::*;
}

//! Tracing/logging setup shared by every entry point.

/// Tracing configuration (filters, layers, writers).
pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, filter_or_default, init};

#[cfg(target_arch = "wasm32")]
pub use crate::tracing::init_browser;

//! Tracing/logging initialization.
//!
//! Native processes (tests, tools) log JSON lines; the browser build sends
//! events to the developer console through `tracing-wasm`, which keeps each
//! event's level (`console.error` for errors, `console.warn` for warnings).
//! `RUST_LOG`, where it exists, overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "info";

/// Parse filter directives, falling back to [`DEFAULT_FILTER`] when they do
/// not parse.
pub fn filter_or_default(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for a native process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Initialize tracing for the browser build.
///
/// `filter` uses `EnvFilter` directive syntax (e.g. `"forgepos_router=debug"`).
/// Safe to call multiple times.
#[cfg(target_arch = "wasm32")]
pub fn init_browser(filter: &str) {
    use tracing_subscriber::prelude::*;

    let console = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_report_logs_in_timings(false)
            .build(),
    );

    let _ = tracing_subscriber::registry()
        .with(filter_or_default(filter))
        .with(console)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        tracing::info!(target: "forgepos_observability", "subscriber installed");
    }

    #[test]
    fn unparsable_filter_falls_back_to_default() {
        assert_eq!(
            filter_or_default("forgepos_router=debug").to_string(),
            "forgepos_router=debug"
        );
        assert_eq!(filter_or_default("forgepos=loudest").to_string(), DEFAULT_FILTER);
    }
}

//! Tracing/logging initialization for embedding applications.
//!
//! The catalog crates only *emit* `tracing` events; wiring a subscriber
//! is the host application's decision and happens here.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing with the `RUST_LOG`-driven filter
/// (default `info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Initialize with an explicit default filter, still overridable via
/// `RUST_LOG`. JSON output with timestamps.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

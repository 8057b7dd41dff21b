//! Diagnostic logging
//!
//! Logs go to stderr only; stdout carries nothing but the report. The
//! default level is `warn`, so a normal run is silent. `RUST_LOG=debug`
//! shows phase timings and the verdict.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Install the stderr subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

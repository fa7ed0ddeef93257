//! Tracing setup for the command-line tools.

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber used by every binary.
///
/// stdout carries JSON reports, so logs go to stderr. `RUST_LOG` overrides
/// the default `info` level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

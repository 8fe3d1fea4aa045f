#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Simple logging utilities for the compiler.
//!
//! Log output always goes to stderr; stdout belongs to the plugin protocol.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "GRPCGEN_LOG";

/// Install the global stderr subscriber.
///
/// The filter is read from `GRPCGEN_LOG` when set, otherwise `level` is used.
/// Calling this more than once is harmless; only the first call installs a subscriber.
/// Returns whether this call installed it.
pub fn init(level: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Emits a trace-level event tagged with `module`.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module = module, "{}", msg);
}

/// Emits a debug-level event tagged with `module`.
pub fn debug(module: &str, msg: &str) {
    tracing::debug!(module = module, "{}", msg);
}

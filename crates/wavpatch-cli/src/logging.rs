//! Diagnostic logging setup.
//!
//! Library events go through `tracing`; this installs a stderr subscriber so
//! command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "WAVPATCH_LOG";

/// Builds the filter: `WAVPATCH_LOG` if set, else `debug` when verbose, else `warn`.
pub fn filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

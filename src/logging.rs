//! Logging setup.
//!
//! Logs go to stderr so `altcredit score` can keep stdout for the JSON reply.
//! The filter comes from `RUST_LOG`, falling back to `DEFAULT_FILTER`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "altcredit=info";

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed (tests, embedding callers); keep it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

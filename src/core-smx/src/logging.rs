//! Tracing setup for the `core-smx` binary and for embedding applications.
//!
//! Log lines go to stderr so that XML printed to stdout stays clean.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_directives` (e.g. `core_smx=info`).
///
/// Fails if a global subscriber is already installed.
pub fn try_setup_logging(default_directives: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(default_directives))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
}

/// Like [`try_setup_logging`], but keeps an already installed subscriber instead of failing.
pub fn setup_logging(default_directives: &str) {
    if let Err(e) = try_setup_logging(default_directives) {
        tracing::debug!("Keeping existing tracing subscriber: {}", e);
    }
}

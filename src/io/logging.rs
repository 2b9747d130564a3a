//! Structured log subscriber setup

use crate::io::error::{GenerationError, Result};
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset
pub const fn default_level(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}

/// Install the global stderr subscriber, honouring `RUST_LOG` when set
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_logging(quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| GenerationError::Logging {
            reason: e.to_string(),
        })
}

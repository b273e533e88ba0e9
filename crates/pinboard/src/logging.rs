#![forbid(unsafe_code)]

//! Log output for hosts and demos.
//!
//! Pinboard crates only emit `tracing` events; nothing is printed unless a
//! subscriber is installed. [`init`] installs a formatted subscriber filtered
//! by the `PINBOARD_LOG` environment variable (same syntax as `RUST_LOG`),
//! defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const ENV_VAR: &str = "PINBOARD_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Filter from `PINBOARD_LOG`, or the default when unset or invalid.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber.
///
/// Returns `false` if a global subscriber was already set; the existing one
/// is left in place.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init()
        .is_ok()
}

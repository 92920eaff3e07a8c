//! Log subscriber setup for the command-line host.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary so embedders keep control of their own output.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

/// Level used when neither `WALLGRID_LOG` nor `RUST_LOG` is set.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Level used with `--verbose`, unless an environment filter is set.
const VERBOSE_DIRECTIVE: &str = "wallgrid_lib=debug,warn";

/// Builds the filter from the environment, falling back to the verbosity flag.
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_DIRECTIVE } else { DEFAULT_DIRECTIVE };

    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs a stderr subscriber. Does nothing if one is already installed.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Structured logging setup.
//!
//! Everything in Statline logs through `tracing`. Binaries call [`init`] once
//! at startup; libraries and tests never install a subscriber themselves.

use statline_foundation::{Error, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds a filter from a directive such as `statline=debug,warn`.
///
/// # Errors
///
/// Returns `InvalidConfig` if the directive does not parse.
pub fn filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| Error::invalid_config(format!("bad log filter '{directive}': {e}")))
}

/// Installs the global subscriber writing to stderr.
///
/// Returns false if a subscriber was already installed, in which case the
/// existing one is left alone.
///
/// # Errors
///
/// Returns `InvalidConfig` if the directive does not parse.
pub fn init(directive: &str) -> Result<bool> {
    let filter = filter(directive)?;
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok();
    Ok(installed)
}

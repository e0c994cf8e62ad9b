#![forbid(unsafe_code)]

//! Subscriber installation for hosts that do not bring their own.
//!
//! Libraries only emit `tracing` events; installing a subscriber is the
//! application's call. This helper wires the common case: a `fmt`
//! subscriber filtered by `RUST_LOG`, or by a default directive when the
//! environment says nothing.

use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Directive used when the host asks for verbose output.
pub const VERBOSE_DIRECTIVE: &str = "flexi_core=trace,flexi_layout=debug,flexi_slider=debug";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}

/// Build the filter `install` would use.
pub fn filter(verbose: bool) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };
    Ok(EnvFilter::try_new(directive)?)
}

/// Install a global `fmt` subscriber.
pub fn install(verbose: bool) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose)?)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
        assert!(EnvFilter::try_new(VERBOSE_DIRECTIVE).is_ok());
    }

    #[test]
    fn second_install_reports_already_installed() {
        let _ = install(false);
        assert!(matches!(install(true), Err(LoggingError::AlreadyInstalled)));
    }
}

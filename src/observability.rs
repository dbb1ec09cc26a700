//! Logging initialization.
//!
//! A single-shot CLI needs structured logs on stderr and nothing else; the
//! subscriber is installed once per process and later calls are no-ops.

use crate::{Error, Result};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Default filter when `PRESCREEN_LOG` is unset.
const DEFAULT_FILTER: &str = "prescreen=info,warn";

/// Verbose filter selected by `--verbose`.
const VERBOSE_FILTER: &str = "prescreen=debug,info";

/// Initializes the global tracing subscriber.
///
/// The filter comes from `PRESCREEN_LOG` when set, otherwise from the
/// `verbose` flag. Logs go to stderr so scorecard output on stdout stays
/// clean for piping.
///
/// # Errors
///
/// Returns an error if the subscriber cannot be installed.
pub fn init(verbose: bool) -> Result<()> {
    let mut result: Result<()> = Ok(());

    LOGGING_INIT.get_or_init(|| {
        let fallback = if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        };
        let filter = EnvFilter::try_from_env("PRESCREEN_LOG")
            .unwrap_or_else(|_| EnvFilter::new(fallback));

        result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| Error::OperationFailed {
                operation: "init_logging".to_string(),
                cause: e.to_string(),
            });
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert!(init(false).is_ok());
        // Second call hits the OnceLock guard and must not error.
        assert!(init(true).is_ok());
    }
}

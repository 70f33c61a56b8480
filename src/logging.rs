//! logging
//!
//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`, so they never mix with
//! command output on stdout. The filter comes from `TWIG_LOG` using
//! `EnvFilter` syntax (`debug`, `twig::engine=trace`, ...), defaulting to
//! `warn`. `--debug` overrides it with `debug`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TWIG_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter for the given `--debug` setting.
///
/// An unparseable `TWIG_LOG` falls back to the default.
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(debug)
        .without_time()
        .try_init();
}

//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so stdout stays reserved for the report (and parseable
//! with `--json`).

use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default filter directive.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `RUST_LOG` wins when set, otherwise `-v` decides.
fn env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init(verbose: u8, color: bool) {
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(verbose > 2)
        .try_init()
    {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}

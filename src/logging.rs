// Logging module for scan diagnostics using the tracing crate

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Diagnostics go to stderr so stdout carries nothing but finding lines.
/// Verbose mode enables the debug-level narration (regions discovered,
/// pages scanned, probe attempts and their rejections); otherwise only
/// errors surface. `RUST_LOG` overrides either default.
pub fn init_subscriber(verbose: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let default_filter = if verbose { "s3sentry=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()?;

    Ok(())
}

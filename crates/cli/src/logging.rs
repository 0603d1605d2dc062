//! Logging setup and configuration

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Setup tracing subscriber for the CLI.
///
/// `RUST_LOG` wins when set, otherwise the given default level. Log lines go
/// to stderr so they never interleave with the prompt or the listing on
/// stdout.
pub fn setup_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log filter: {}", default_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

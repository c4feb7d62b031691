use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Initializes the tracing subscriber for the process.
///
/// The filter honors `RUST_LOG` and falls back to `info` when unset or invalid.
pub fn setup_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init()
        .context("failed to initialize the tracing subscriber")
}

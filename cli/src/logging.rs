use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// Events from this binary carry its crate name (`settracker`), not the package name.
const CRATES: [&str; 2] = [env!("CARGO_CRATE_NAME"), "settracker_core"];

/// Sends diagnostics to stderr so they never mix with the report on stdout.
///
/// An explicit level applies to this workspace's crates only; otherwise `RUST_LOG` decides,
/// defaulting to warnings.
pub fn enable_logging(log_level: Option<LevelFilter>) -> Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::new(filter_directives(level)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Could not initialize logging: {e}"))
}

fn filter_directives(level: LevelFilter) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| anyhow!("invalid log filter '{}': {}", default_level, e))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("telemetry error: {}", e))
}

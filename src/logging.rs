//! Tracing subscriber setup.

use crate::config::{Config, LogFormat};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` wins when set, otherwise the configured level.
pub fn env_filter(config: &Config) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.log_level)?),
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: &Config) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        // The Lambda console already timestamps each line.
        LogFormat::Json => builder
            .json()
            .without_time()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?,
        LogFormat::PlainText => builder.try_init().map_err(|e| anyhow::anyhow!(e))?,
    }
    Ok(())
}

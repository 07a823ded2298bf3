//! Tracing subscriber setup

use crate::settings::LoggingConfig;
use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Filter from a directive string such as `info` or `cpmm_amm=debug,warn`
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("Invalid log filter: {}", level))
}

/// Install the global `fmt` subscriber
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` if a
/// global subscriber was already installed, which is not an error.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        debug!(json = config.json, "Logging initialized");
    }
    Ok(installed)
}

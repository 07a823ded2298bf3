//! Settings loading
//!
//! Supports a TOML base file with environment-specific overlays and
//! `CPMM__`-prefixed environment variable overrides.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, Map};
use cpmm_amm::{InitializeRequest, BPS_SCALE};
use cpmm_types::{AccountId, AssetId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Top-level settings
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AmmSettings {
    pub pool: PoolDefaults,
    pub logging: LoggingConfig,
}

/// Defaults applied to newly created pools
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PoolDefaults {
    /// Swap fee applied to pools created from these settings
    pub fee_bps: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `cpmm_amm=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for PoolDefaults {
    fn default() -> Self {
        Self {
            fee_bps: defaults::pool::FEE_BPS,
        }
    }
}

impl PoolDefaults {
    /// Pool creation request carrying the configured fee
    pub fn initialize_request(
        &self,
        seed: u64,
        asset_x: AssetId,
        asset_y: AssetId,
        authority: Option<AccountId>,
    ) -> InitializeRequest {
        InitializeRequest {
            seed,
            asset_x,
            asset_y,
            fee_bps: self.fee_bps,
            authority,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: false,
        }
    }
}

impl AmmSettings {
    /// Load settings from files with environment overrides
    ///
    /// A missing base file is only an error when `base_path` was given.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        Self::load_with_vars(base_path, environment, None)
    }

    /// Like [`load`](Self::load), reading overrides from `vars` instead of the
    /// process environment when provided
    pub fn load_with_vars(
        base_path: Option<&Path>,
        environment: Option<&str>,
        vars: Option<Map<String, String>>,
    ) -> Result<Self> {
        let explicit = base_path.is_some();
        let base = base_path.unwrap_or(Path::new(defaults::paths::BASE_FILE));

        if explicit && !base.exists() {
            bail!("Settings file not found: {}", base.display());
        }

        let mut builder = Config::builder().add_source(File::from(base).required(explicit));

        if let Some(env) = environment {
            let env_file = Self::environment_file(base, env);
            if env_file.exists() {
                info!("Loading environment settings: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment settings not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::paths::ENV_PREFIX)
                .separator(defaults::paths::ENV_SEPARATOR)
                .try_parsing(true)
                .source(vars),
        );

        let config = builder.build().context("Failed to build settings")?;
        let settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize settings")?;

        settings.validate()?;
        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// `<base dir>/environments/<env>.toml`
    pub fn environment_file(base: &Path, environment: &str) -> PathBuf {
        base.parent()
            .unwrap_or(Path::new("."))
            .join(defaults::paths::ENVIRONMENTS_DIR)
            .join(format!("{}.toml", environment))
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool.fee_bps as u64 > BPS_SCALE {
            bail!(
                "pool.fee_bps must be at most {}, got {}",
                BPS_SCALE,
                self.pool.fee_bps
            );
        }
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }
}

/// Load settings from the default location
pub fn load_settings(environment: Option<&str>) -> Result<AmmSettings> {
    AmmSettings::load(None, environment)
}

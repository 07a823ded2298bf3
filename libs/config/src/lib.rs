//! # CPMM Configuration
//!
//! Layered settings for hosts embedding the pool core, plus logging setup.
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. built-in defaults ([`defaults`])
//! 2. base TOML file (`config/cpmm.toml` unless a path is given)
//! 3. `environments/<env>.toml` next to the base file
//! 4. environment variables, e.g. `CPMM__POOL__FEE_BPS=25`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cpmm_config::{init_logging, load_settings};
//!
//! let settings = load_settings(Some("production")).unwrap();
//! init_logging(&settings.logging).unwrap();
//! assert!(settings.pool.fee_bps <= 10_000);
//! ```

pub mod defaults;
pub mod logging;
pub mod settings;

pub use logging::{build_filter, init_logging};
pub use settings::{load_settings, AmmSettings, LoggingConfig, PoolDefaults};

//! Default values used when a setting is absent from every source

/// Pool creation defaults
pub mod pool {
    /// Swap fee in basis points (0.30%)
    pub const FEE_BPS: u16 = 30;
}

/// Logging defaults
pub mod logging {
    /// Filter directive used when neither config nor `RUST_LOG` sets one
    pub const LEVEL: &str = "info";
}

/// Where settings are looked up when no path is given
pub mod paths {
    pub const BASE_FILE: &str = "config/cpmm.toml";

    /// Overlay directory, relative to the base file's directory
    pub const ENVIRONMENTS_DIR: &str = "environments";

    /// Environment variable prefix, e.g. `CPMM__POOL__FEE_BPS`
    pub const ENV_PREFIX: &str = "CPMM";

    pub const ENV_SEPARATOR: &str = "__";
}

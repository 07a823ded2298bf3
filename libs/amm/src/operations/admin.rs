//! Emergency lock toggle, gated on the pool authority

use crate::error::{AmmError, Result};
use crate::pool::PoolConfig;
use cpmm_types::AccountId;
use tracing::{info, warn};

pub struct LockOperation;

impl LockOperation {
    /// Return `config` with `locked` set to the requested value
    ///
    /// Fails with `PoolLocked`/`PoolUnlocked` when the flag already has that
    /// value, and with `Unauthorized` unless `caller` is the configured
    /// authority. A pool without an authority can never be toggled.
    pub fn execute(config: &PoolConfig, caller: &AccountId, locked: bool) -> Result<PoolConfig> {
        match (config.locked, locked) {
            (true, true) => return Err(AmmError::PoolLocked),
            (false, false) => return Err(AmmError::PoolUnlocked),
            _ => {}
        }

        if config.authority.as_ref() != Some(caller) {
            warn!(caller = %caller, "Lock toggle by non-authority");
            return Err(AmmError::Unauthorized { caller: *caller });
        }

        info!(pool = %config.pool_id(), locked, "Pool lock toggled");

        Ok(PoolConfig {
            locked,
            ..config.clone()
        })
    }

    pub fn lock(config: &PoolConfig, caller: &AccountId) -> Result<PoolConfig> {
        Self::execute(config, caller, true)
    }

    pub fn unlock(config: &PoolConfig, caller: &AccountId) -> Result<PoolConfig> {
        Self::execute(config, caller, false)
    }
}

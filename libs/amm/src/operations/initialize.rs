//! Pool creation

use crate::effects::{EffectList, LedgerEffect};
use crate::error::Result;
use crate::pool::{PoolConfig, ReserveLedger};
use cpmm_types::{AccountId, AssetId, PoolId, ShareMintId};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeRequest {
    pub seed: u64,
    pub asset_x: AssetId,
    pub asset_y: AssetId,
    pub fee_bps: u16,
    pub authority: Option<AccountId>,
}

/// A freshly created, unlocked and empty pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializedPool {
    pub pool_id: PoolId,
    pub share_mint: ShareMintId,
    pub config: PoolConfig,
    pub reserves: ReserveLedger,
    pub effects: Vec<LedgerEffect>,
}

pub struct InitializeOperation;

impl InitializeOperation {
    /// Build the config and zeroed reserves for a new pool
    ///
    /// Uniqueness of the derived pool identity is the host's job; see
    /// [`PoolExecutor::initialize`](crate::executor::PoolExecutor::initialize).
    pub fn execute(request: &InitializeRequest) -> Result<InitializedPool> {
        let config = PoolConfig {
            seed: request.seed,
            asset_x: request.asset_x,
            asset_y: request.asset_y,
            fee_bps: request.fee_bps,
            locked: false,
            authority: request.authority,
        };
        config.validate()?;

        let pool_id = config.pool_id();
        let share_mint = config.share_mint();

        debug!(
            pool = %pool_id,
            fee_bps = config.fee_bps,
            seed = config.seed,
            "Initializing pool"
        );

        Ok(InitializedPool {
            pool_id,
            share_mint,
            config,
            reserves: ReserveLedger::EMPTY,
            effects: EffectList::new().create_share_mint(share_mint).into_vec(),
        })
    }
}

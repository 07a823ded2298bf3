//! Pool configuration and reserve ledger
//!
//! `PoolConfig` is the immutable identity and parameters of a pool (plus the
//! lock flag); `ReserveLedger` is the mutable balance pair and share supply.
//! Both are plain values: operations take the current snapshot by reference
//! and return the next one.

use crate::error::{AmmError, Result};
use crate::math::{FixedPointMath, BPS_SCALE};
use cpmm_types::{derive_pool_id, derive_share_mint_id, AccountId, AssetId, PoolId, ShareMintId};
use serde::{Deserialize, Serialize};

/// Which asset the caller is putting into a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Pay asset X, receive asset Y
    XToY,
    /// Pay asset Y, receive asset X
    YToX,
}

impl SwapDirection {
    pub fn from_input_is_x(input_is_x: bool) -> Self {
        if input_is_x {
            SwapDirection::XToY
        } else {
            SwapDirection::YToX
        }
    }

    pub fn input_is_x(self) -> bool {
        matches!(self, SwapDirection::XToY)
    }
}

/// Per-pool identity and parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Distinguishes several pools over the same asset pair
    pub seed: u64,
    pub asset_x: AssetId,
    pub asset_y: AssetId,
    /// Swap fee on input, 0..=10000
    pub fee_bps: u16,
    /// When set, deposit/swap/withdraw are rejected
    pub locked: bool,
    /// The only identity allowed to toggle `locked`; `None` means nobody can
    pub authority: Option<AccountId>,
}

impl PoolConfig {
    pub fn pool_id(&self) -> PoolId {
        derive_pool_id(&self.asset_x, &self.asset_y, self.seed)
    }

    pub fn share_mint(&self) -> ShareMintId {
        derive_share_mint_id(&self.pool_id())
    }

    /// (input asset, output asset) for a swap direction
    pub fn assets_for(&self, direction: SwapDirection) -> (AssetId, AssetId) {
        match direction {
            SwapDirection::XToY => (self.asset_x, self.asset_y),
            SwapDirection::YToX => (self.asset_y, self.asset_x),
        }
    }

    /// Fee charged on `amount_in`, rounded down so it never exceeds the nominal rate
    pub fn fee_on(&self, amount_in: u64) -> Result<u64> {
        FixedPointMath::mul_div(amount_in, self.fee_bps as u64, BPS_SCALE)
    }

    pub fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(AmmError::PoolLocked);
        }
        Ok(())
    }

    /// Creation-time parameter checks
    pub fn validate(&self) -> Result<()> {
        if self.fee_bps as u64 > BPS_SCALE {
            return Err(AmmError::InvalidFee {
                fee_bps: self.fee_bps,
            });
        }
        if self.asset_x == self.asset_y {
            return Err(AmmError::InvalidAssetPair {
                asset: self.asset_x,
            });
        }
        Ok(())
    }
}

/// Reserve balances and outstanding share supply of one pool
///
/// Either all three fields are zero, or all three are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReserveLedger {
    pub reserve_x: u64,
    pub reserve_y: u64,
    pub total_shares: u64,
}

impl ReserveLedger {
    pub const EMPTY: Self = Self {
        reserve_x: 0,
        reserve_y: 0,
        total_shares: 0,
    };

    pub fn new(reserve_x: u64, reserve_y: u64, total_shares: u64) -> Self {
        Self {
            reserve_x,
            reserve_y,
            total_shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }

    /// `reserve_x * reserve_y`
    pub fn product(&self) -> u128 {
        FixedPointMath::product(self.reserve_x, self.reserve_y)
    }

    /// Reject partially emptied ledgers
    pub fn validate(&self) -> Result<()> {
        let zeros = [self.reserve_x, self.reserve_y, self.total_shares]
            .iter()
            .filter(|v| **v == 0)
            .count();

        match zeros {
            0 | 3 => Ok(()),
            _ => Err(AmmError::InvariantViolation(
                "reserves and share supply must be all zero or all positive",
            )),
        }
    }

    /// (reserve_in, reserve_out) for a swap direction
    pub fn oriented(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::XToY => (self.reserve_x, self.reserve_y),
            SwapDirection::YToX => (self.reserve_y, self.reserve_x),
        }
    }

    /// Rebuild from oriented reserves, keeping the share supply
    pub fn with_oriented(&self, direction: SwapDirection, reserve_in: u64, reserve_out: u64) -> Self {
        match direction {
            SwapDirection::XToY => Self::new(reserve_in, reserve_out, self.total_shares),
            SwapDirection::YToX => Self::new(reserve_out, reserve_in, self.total_shares),
        }
    }
}

/// Persisted pool state, addressed by the derived pool identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAccount {
    pub config: PoolConfig,
    pub reserves: ReserveLedger,
}

impl PoolAccount {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub(crate) fn with_reserves(self, reserves: ReserveLedger) -> Self {
        Self {
            config: self.config,
            reserves,
        }
    }
}

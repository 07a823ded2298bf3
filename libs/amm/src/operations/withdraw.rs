//! Removing liquidity
//!
//! Burning shares pays out the proportional slice of both reserves, rounded
//! down; the rounding remainder stays with the remaining providers.

use crate::effects::{EffectList, Transition};
use crate::error::{AmmError, Result};
use crate::math::FixedPointMath;
use crate::pool::{PoolConfig, ReserveLedger};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// Shares to burn, must be positive
    pub shares: u64,
    pub min_x: u64,
    pub min_y: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    pub shares_burned: u64,
    pub amount_x: u64,
    pub amount_y: u64,
}

pub struct WithdrawOperation;

impl WithdrawOperation {
    pub fn execute(
        config: &PoolConfig,
        reserves: &ReserveLedger,
        request: &WithdrawRequest,
    ) -> Result<Transition<WithdrawReceipt>> {
        config.ensure_unlocked()?;
        if request.shares == 0 {
            return Err(AmmError::InvalidAmount {
                reason: "withdraw must burn a positive share amount",
            });
        }
        reserves.validate()?;
        if request.shares > reserves.total_shares {
            return Err(AmmError::InsufficientLiquidity {
                requested: request.shares,
                available: reserves.total_shares,
            });
        }

        let amount_x =
            FixedPointMath::proportional(request.shares, reserves.reserve_x, reserves.total_shares)?;
        let amount_y =
            FixedPointMath::proportional(request.shares, reserves.reserve_y, reserves.total_shares)?;

        if amount_x < request.min_x {
            warn!(amount_x, min_x = request.min_x, "Withdraw X below minimum");
            return Err(AmmError::SlippageExceeded {
                computed: amount_x,
                bound: request.min_x,
            });
        }
        if amount_y < request.min_y {
            warn!(amount_y, min_y = request.min_y, "Withdraw Y below minimum");
            return Err(AmmError::SlippageExceeded {
                computed: amount_y,
                bound: request.min_y,
            });
        }
        if amount_x == 0 && amount_y == 0 {
            return Err(AmmError::InvalidAmount {
                reason: "share amount too small to withdraw anything",
            });
        }

        let next = ReserveLedger::new(
            FixedPointMath::checked_sub(reserves.reserve_x, amount_x)?,
            FixedPointMath::checked_sub(reserves.reserve_y, amount_y)?,
            FixedPointMath::checked_sub(reserves.total_shares, request.shares)?,
        );
        next.validate()?;

        debug!(
            shares = request.shares,
            amount_x,
            amount_y,
            total_shares = next.total_shares,
            "Withdraw computed"
        );

        let effects = EffectList::new()
            .burn_shares(config.share_mint(), request.shares)
            .transfer_out(config.asset_x, amount_x)
            .transfer_out(config.asset_y, amount_y)
            .into_vec();

        Ok(Transition {
            receipt: WithdrawReceipt {
                shares_burned: request.shares,
                amount_x,
                amount_y,
            },
            reserves: next,
            effects,
        })
    }
}

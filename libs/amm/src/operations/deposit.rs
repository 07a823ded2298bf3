//! Adding liquidity
//!
//! The caller names how many shares they want and caps what they will pay.
//! On an empty pool the caps are taken as the exact contribution and set the
//! price; afterwards the contribution is derived from the current ratio,
//! rounded down, and checked against the caps.

use crate::effects::{EffectList, Transition};
use crate::error::{AmmError, Result};
use crate::math::FixedPointMath;
use crate::pool::{PoolConfig, ReserveLedger};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    /// Liquidity shares to mint, must be positive
    pub shares: u64,
    /// Most of asset X the caller will contribute
    pub max_x: u64,
    /// Most of asset Y the caller will contribute
    pub max_y: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub shares_minted: u64,
    pub amount_x: u64,
    pub amount_y: u64,
    /// True when this deposit set the initial price
    pub initial: bool,
}

pub struct DepositOperation;

impl DepositOperation {
    pub fn execute(
        config: &PoolConfig,
        reserves: &ReserveLedger,
        request: &DepositRequest,
    ) -> Result<Transition<DepositReceipt>> {
        config.ensure_unlocked()?;
        if request.shares == 0 {
            return Err(AmmError::InvalidAmount {
                reason: "deposit must request a positive share amount",
            });
        }
        reserves.validate()?;

        let initial = reserves.is_empty();
        let (amount_x, amount_y) = if initial {
            Self::initial_amounts(request)?
        } else {
            Self::proportional_amounts(reserves, request)?
        };

        let next = ReserveLedger::new(
            FixedPointMath::checked_add(reserves.reserve_x, amount_x)?,
            FixedPointMath::checked_add(reserves.reserve_y, amount_y)?,
            FixedPointMath::checked_add(reserves.total_shares, request.shares)?,
        );

        debug!(
            shares = request.shares,
            amount_x,
            amount_y,
            initial,
            total_shares = next.total_shares,
            "Deposit computed"
        );

        let share_mint = config.share_mint();
        let effects = EffectList::new()
            .transfer_in(config.asset_x, amount_x)
            .transfer_in(config.asset_y, amount_y)
            .mint_shares(share_mint, request.shares)
            .into_vec();

        Ok(Transition {
            receipt: DepositReceipt {
                shares_minted: request.shares,
                amount_x,
                amount_y,
                initial,
            },
            reserves: next,
            effects,
        })
    }

    fn initial_amounts(request: &DepositRequest) -> Result<(u64, u64)> {
        if request.max_x == 0 || request.max_y == 0 {
            return Err(AmmError::InvalidAmount {
                reason: "first deposit must contribute both assets",
            });
        }
        Ok((request.max_x, request.max_y))
    }

    fn proportional_amounts(reserves: &ReserveLedger, request: &DepositRequest) -> Result<(u64, u64)> {
        let required_x =
            FixedPointMath::proportional(request.shares, reserves.reserve_x, reserves.total_shares)?;
        let required_y =
            FixedPointMath::proportional(request.shares, reserves.reserve_y, reserves.total_shares)?;

        if required_x == 0 || required_y == 0 {
            return Err(AmmError::InvalidAmount {
                reason: "share amount too small to require any contribution",
            });
        }

        if required_x > request.max_x {
            warn!(required_x, max_x = request.max_x, "Deposit exceeds max X");
            return Err(AmmError::SlippageExceeded {
                computed: required_x,
                bound: request.max_x,
            });
        }
        if required_y > request.max_y {
            warn!(required_y, max_y = request.max_y, "Deposit exceeds max Y");
            return Err(AmmError::SlippageExceeded {
                computed: required_y,
                bound: request.max_y,
            });
        }

        Ok((required_x, required_y))
    }
}

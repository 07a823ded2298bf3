//! Directional trades against the constant product curve
//!
//! The fee is skimmed from the input before pricing and then left in the
//! pool, which is how liquidity providers earn it:
//!
//! ```text
//! fee       = floor(amount_in * fee_bps / 10000)
//! net_in    = amount_in - fee
//! k         = reserve_in * reserve_out
//! out'      = ceil(k / (reserve_in + net_in))
//! amount_out = reserve_out - out'
//! ```
//!
//! Taking the ceiling of the remaining output reserve rounds the trader's
//! output down, so `(reserve_in + amount_in) * out' >= k` for every swap.

use crate::effects::{EffectList, Transition};
use crate::error::{AmmError, Result};
use crate::math::FixedPointMath;
use crate::pool::{PoolConfig, ReserveLedger, SwapDirection};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub input_is_x: bool,
    /// Input paid by the caller, must be positive
    pub amount_in: u64,
    /// Smallest acceptable output
    pub min_out: u64,
}

impl SwapRequest {
    pub fn direction(&self) -> SwapDirection {
        SwapDirection::from_input_is_x(self.input_is_x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub direction: SwapDirection,
    pub amount_in: u64,
    /// Portion of `amount_in` retained as fee
    pub fee_amount: u64,
    pub amount_out: u64,
}

pub struct SwapOperation;

impl SwapOperation {
    pub fn execute(
        config: &PoolConfig,
        reserves: &ReserveLedger,
        request: &SwapRequest,
    ) -> Result<Transition<SwapReceipt>> {
        config.ensure_unlocked()?;

        let direction = request.direction();
        let (receipt, next) = Self::compute(config, reserves, direction, request.amount_in)?;

        if receipt.amount_out < request.min_out {
            warn!(
                amount_out = receipt.amount_out,
                min_out = request.min_out,
                "Swap output below minimum"
            );
            return Err(AmmError::SlippageExceeded {
                computed: receipt.amount_out,
                bound: request.min_out,
            });
        }
        if receipt.amount_out == 0 {
            return Err(AmmError::InvalidAmount {
                reason: "swap input too small to produce any output",
            });
        }

        let (asset_in, asset_out) = config.assets_for(direction);
        let effects = EffectList::new()
            .transfer_in(asset_in, receipt.amount_in)
            .transfer_out(asset_out, receipt.amount_out)
            .into_vec();

        Ok(Transition {
            receipt,
            reserves: next,
            effects,
        })
    }

    /// Price a swap without the lock and slippage gates
    ///
    /// Shared by [`execute`](Self::execute) and read-only quotes.
    pub(crate) fn compute(
        config: &PoolConfig,
        reserves: &ReserveLedger,
        direction: SwapDirection,
        amount_in: u64,
    ) -> Result<(SwapReceipt, ReserveLedger)> {
        if amount_in == 0 {
            return Err(AmmError::InvalidAmount {
                reason: "swap input must be positive",
            });
        }
        reserves.validate()?;
        if reserves.reserve_x == 0 || reserves.reserve_y == 0 {
            return Err(AmmError::EmptyPool);
        }

        let (reserve_in, reserve_out) = reserves.oriented(direction);

        let fee_amount = config.fee_on(amount_in)?;
        let net_in = FixedPointMath::checked_sub(amount_in, fee_amount)?;

        let k = FixedPointMath::product(reserve_in, reserve_out);
        let remaining_out = FixedPointMath::to_u64(FixedPointMath::div_ceil_wide(
            k,
            reserve_in as u128 + net_in as u128,
        )?)?;
        let amount_out = FixedPointMath::checked_sub(reserve_out, remaining_out)?;

        let new_reserve_in = FixedPointMath::checked_add(reserve_in, amount_in)?;
        if FixedPointMath::product(new_reserve_in, remaining_out) < k {
            return Err(AmmError::InvariantViolation(
                "swap would decrease the reserve product",
            ));
        }

        debug!(
            ?direction,
            amount_in,
            fee_amount,
            amount_out,
            reserve_in = new_reserve_in,
            reserve_out = remaining_out,
            "Swap computed"
        );

        Ok((
            SwapReceipt {
                direction,
                amount_in,
                fee_amount,
                amount_out,
            },
            reserves.with_oriented(direction, new_reserve_in, remaining_out),
        ))
    }
}

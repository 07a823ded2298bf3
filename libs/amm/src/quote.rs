//! Read-only swap quotes for display
//!
//! Prices here are `Decimal` ratios of raw smallest-unit amounts. They are
//! never fed back into accounting; settlement always goes through the integer
//! operations.

use crate::error::{AmmError, Result};
use crate::operations::SwapOperation;
use crate::pool::{PoolConfig, ReserveLedger, SwapDirection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// What a swap would do against the current reserves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub fee_amount: u64,
    pub amount_out: u64,
    /// Output units per input unit before the trade
    pub spot_price: Decimal,
    /// Output units per input unit actually received
    pub execution_price: Decimal,
    /// Shortfall of execution price against spot, in basis points
    pub price_impact_bps: Decimal,
}

/// Marginal output per unit of input, `None` on an empty pool
pub fn spot_price(reserves: &ReserveLedger, direction: SwapDirection) -> Option<Decimal> {
    let (reserve_in, reserve_out) = reserves.oriented(direction);
    if reserve_in == 0 {
        return None;
    }
    Decimal::from(reserve_out).checked_div(Decimal::from(reserve_in))
}

/// Price a prospective swap; ignores the lock flag and slippage bounds
pub fn quote_swap(
    config: &PoolConfig,
    reserves: &ReserveLedger,
    direction: SwapDirection,
    amount_in: u64,
) -> Result<SwapQuote> {
    let (receipt, _) = SwapOperation::compute(config, reserves, direction, amount_in)?;

    let spot = spot_price(reserves, direction).ok_or(AmmError::EmptyPool)?;
    let execution = Decimal::from(receipt.amount_out)
        .checked_div(Decimal::from(amount_in))
        .ok_or(AmmError::ArithmeticOverflow)?;

    let impact = if spot.is_zero() {
        Decimal::ZERO
    } else {
        ((spot - execution) / spot * dec!(10000)).round_dp(2)
    };

    Ok(SwapQuote {
        direction,
        amount_in,
        fee_amount: receipt.fee_amount,
        amount_out: receipt.amount_out,
        spot_price: spot,
        execution_price: execution,
        price_impact_bps: impact,
    })
}

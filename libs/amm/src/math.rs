//! Overflow-checked fixed-point arithmetic
//!
//! All amounts are `u64` in an asset's smallest unit. Every multiply that can
//! exceed 64 bits is carried out in `u128` before dividing, division floors
//! unless the function name says otherwise, and anything that would wrap or
//! divide by zero returns [`AmmError::ArithmeticOverflow`].

use crate::error::{AmmError, Result};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Checked integer math used by every pool operation
pub struct FixedPointMath;

impl FixedPointMath {
    /// `floor(a * b / denom)` with a 128-bit intermediate
    pub fn mul_div(a: u64, b: u64, denom: u64) -> Result<u64> {
        if denom == 0 {
            return Err(AmmError::ArithmeticOverflow);
        }

        let product = (a as u128) * (b as u128);
        Self::to_u64(product / denom as u128)
    }

    /// `ceil(a * b / denom)` with a 128-bit intermediate
    pub fn mul_div_ceil(a: u64, b: u64, denom: u64) -> Result<u64> {
        let product = (a as u128) * (b as u128);
        Self::to_u64(Self::div_ceil_wide(product, denom as u128)?)
    }

    /// Share-to-token (or token-to-share) conversion, rounded down
    ///
    /// `amount * numerator / denominator`, e.g. the reserve slice owned by
    /// `amount` shares out of `denominator` outstanding.
    #[inline]
    pub fn proportional(amount: u64, numerator: u64, denominator: u64) -> Result<u64> {
        Self::mul_div(amount, numerator, denominator)
    }

    /// `ceil(numerator / denominator)` over 128-bit operands
    pub fn div_ceil_wide(numerator: u128, denominator: u128) -> Result<u128> {
        if denominator == 0 {
            return Err(AmmError::ArithmeticOverflow);
        }

        let quotient = numerator / denominator;
        if numerator % denominator == 0 {
            Ok(quotient)
        } else {
            quotient.checked_add(1).ok_or(AmmError::ArithmeticOverflow)
        }
    }

    /// Largest `r` with `r * r <= n`
    ///
    /// The root of any `u128` fits in 64 bits.
    pub fn integer_sqrt(n: u128) -> u64 {
        if n <= 1 {
            return n as u64;
        }

        // Newton iteration from an overestimate; monotonically decreasing
        let mut x0 = n / 2;
        let mut x1 = (x0 + n / x0) / 2;
        while x1 < x0 {
            x0 = x1;
            x1 = (x0 + n / x0) / 2;
        }
        x0 as u64
    }

    /// Geometric mean of the two contributions, a neutral share count for a
    /// first deposit that does not depend on either asset's decimals
    pub fn suggested_initial_shares(amount_x: u64, amount_y: u64) -> u64 {
        Self::integer_sqrt((amount_x as u128) * (amount_y as u128))
    }

    /// Reserve product `x * y`; never overflows 128 bits
    #[inline]
    pub fn product(x: u64, y: u64) -> u128 {
        (x as u128) * (y as u128)
    }

    #[inline]
    pub fn checked_add(a: u64, b: u64) -> Result<u64> {
        a.checked_add(b).ok_or(AmmError::ArithmeticOverflow)
    }

    #[inline]
    pub fn checked_sub(a: u64, b: u64) -> Result<u64> {
        a.checked_sub(b).ok_or(AmmError::ArithmeticOverflow)
    }

    /// Narrow a 128-bit intermediate back to an amount
    #[inline]
    pub fn to_u64(value: u128) -> Result<u64> {
        u64::try_from(value).map_err(|_| AmmError::ArithmeticOverflow)
    }
}

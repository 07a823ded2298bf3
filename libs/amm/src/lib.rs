//! # CPMM Core - Constant-Product Pool Accounting
//!
//! ## Purpose
//!
//! Accounting core for a two-asset constant-product market maker. Tracks the
//! reserves and share supply of each pool and computes the exact integer
//! outcome of every action: pool creation, proportional deposits, fee-charging
//! swaps along `x * y = k`, and proportional withdrawals.
//!
//! ## Integration Points
//!
//! - **Input**: a pool's current [`PoolConfig`] and [`ReserveLedger`] plus a request
//! - **Output**: a [`Transition`] carrying a receipt, the next reserves and the
//!   [`LedgerEffect`]s a host must apply
//! - **Settlement**: any [`Ledger`] implementation; [`PoolExecutor`] wires
//!   operations, persistence and settlement together
//!
//! ## Precision
//!
//! - All amounts are `u64` smallest units; products are widened to `u128`
//! - Every overflow surfaces as [`AmmError::ArithmeticOverflow`], never a wrap
//! - Rounding always favors the pool: fees, minted-share costs and payouts
//!   round so that `reserve_x * reserve_y` never decreases through a swap
//! - [`Decimal`] appears only in read-only [`quote`] output
//!
//! ## Example
//!
//! ```rust
//! use cpmm_amm::{
//!     DepositRequest, InMemoryLedger, InitializeRequest, Ledger, PoolExecutor, SwapRequest,
//! };
//! use cpmm_types::{AccountId, AssetId};
//!
//! let usdc = AssetId::new([1u8; 32]);
//! let sol = AssetId::new([2u8; 32]);
//! let lp = AccountId::new([7u8; 32]);
//!
//! let mut ledger = InMemoryLedger::new();
//! ledger.credit(usdc, lp, 1_000_000_000).unwrap();
//! ledger.credit(sol, lp, 1_000_000_000_000).unwrap();
//!
//! let mut executor = PoolExecutor::new(ledger);
//! let pool = executor
//!     .initialize(&lp, &InitializeRequest {
//!         seed: 1,
//!         asset_x: usdc,
//!         asset_y: sol,
//!         fee_bps: 30,
//!         authority: Some(lp),
//!     })
//!     .unwrap();
//!
//! executor
//!     .deposit(&pool, &lp, &DepositRequest { shares: 1_000, max_x: 100_000_000, max_y: 300_000_000_000 })
//!     .unwrap();
//! let receipt = executor
//!     .swap(&pool, &lp, &SwapRequest { input_is_x: true, amount_in: 1_000_000, min_out: 1 })
//!     .unwrap();
//!
//! assert!(receipt.amount_out > 0);
//! let vault = pool.vault_account();
//! assert_eq!(executor.ledger().balance(&usdc, &vault), 101_000_000);
//! ```

pub mod effects;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod math;
pub mod operations;
pub mod pool;
pub mod quote;

pub use effects::{LedgerEffect, Transition};
pub use error::{AmmError, LedgerError, Result};
pub use executor::PoolExecutor;
pub use ledger::{apply_effects, InMemoryLedger, Ledger, LedgerResult};
pub use math::{FixedPointMath, BPS_SCALE};
pub use operations::{
    DepositOperation, DepositReceipt, DepositRequest, InitializeOperation, InitializeRequest,
    InitializedPool, LockOperation, SwapOperation, SwapReceipt, SwapRequest, WithdrawOperation,
    WithdrawReceipt, WithdrawRequest,
};
pub use pool::{PoolAccount, PoolConfig, ReserveLedger, SwapDirection};
pub use quote::{quote_swap, spot_price, SwapQuote};

/// Decimal type used by quotes
pub use rust_decimal::Decimal;

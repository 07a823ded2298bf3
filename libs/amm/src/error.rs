//! Error types for pool accounting and the host ledger contract
//!
//! Every operation validates its full precondition set before computing a
//! next state, so any `Err` below means the pool snapshot was left untouched.

use cpmm_types::{AccountId, AssetId, PoolId, ShareMintId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AmmError>;

/// Errors surfaced by pool operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// Zero or otherwise nonsensical quantity
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: &'static str },

    /// Fee outside the [0, 10000] basis point range
    #[error("Invalid fee: {fee_bps} bps exceeds 10000")]
    InvalidFee { fee_bps: u16 },

    /// Both sides of the pair name the same asset
    #[error("Invalid asset pair: both sides are {asset}")]
    InvalidAssetPair { asset: AssetId },

    /// A pool already exists for the derived identity
    #[error("Pool {pool} already exists")]
    DuplicatePool { pool: PoolId },

    /// Swap against a pool with no reserves
    #[error("Pool has no liquidity")]
    EmptyPool,

    /// Computed amount violates a caller-supplied bound
    #[error("Slippage exceeded: computed {computed}, bound {bound}")]
    SlippageExceeded { computed: u64, bound: u64 },

    /// Burn request exceeds outstanding shares
    #[error("Insufficient liquidity: requested {requested} shares, {available} outstanding")]
    InsufficientLiquidity { requested: u64, available: u64 },

    /// External transfer or burn shortfall
    #[error("Insufficient funds in {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        required: u64,
        available: u64,
    },

    /// Deposit, swap and withdraw are disabled
    #[error("Pool is locked")]
    PoolLocked,

    /// Unlock requested on a pool that is not locked
    #[error("Pool is already unlocked")]
    PoolUnlocked,

    /// Caller is not the pool authority, or the pool has none
    #[error("Unauthorized: {caller} is not the pool authority")]
    Unauthorized { caller: AccountId },

    /// Checked arithmetic overflowed or divided by zero
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// A snapshot or computed transition breaks a reserve invariant
    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// Executor has no pool stored under this identity
    #[error("Unknown pool {pool}")]
    UnknownPool { pool: PoolId },

    /// Persisted pool state could not be encoded or decoded
    #[error("Pool state codec error: {0}")]
    Codec(String),

    /// Host ledger rejected an effect for a reason other than funds
    #[error("Ledger error: {0}")]
    Ledger(LedgerError),
}

/// Errors raised by a host ledger while applying effects
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Debit larger than the holder's balance
    #[error("Insufficient funds in {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        required: u64,
        available: u64,
    },

    /// Share mint was never created
    #[error("Unknown share mint {mint}")]
    UnknownShareMint { mint: ShareMintId },

    /// Share mint already exists at this identity
    #[error("Share mint {mint} already exists")]
    ShareMintExists { mint: ShareMintId },

    /// Credit would overflow a balance or supply
    #[error("Balance overflow")]
    BalanceOverflow,
}

impl From<LedgerError> for AmmError {
    fn from(error: LedgerError) -> AmmError {
        match error {
            LedgerError::InsufficientFunds {
                account,
                required,
                available,
            } => AmmError::InsufficientFunds {
                account,
                required,
                available,
            },
            LedgerError::BalanceOverflow => AmmError::ArithmeticOverflow,
            other => AmmError::Ledger(other),
        }
    }
}

impl From<bincode::Error> for AmmError {
    fn from(error: bincode::Error) -> AmmError {
        AmmError::Codec(error.to_string())
    }
}

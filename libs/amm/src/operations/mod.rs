//! Pool state transitions
//!
//! Each operation is a pure function from (config, reserves, request) to a
//! [`Transition`](crate::effects::Transition) or an error. Nothing here
//! touches a ledger; the executor applies the returned effects.

pub mod admin;
pub mod deposit;
pub mod initialize;
pub mod swap;
pub mod withdraw;

pub use admin::LockOperation;
pub use deposit::{DepositOperation, DepositReceipt, DepositRequest};
pub use initialize::{InitializeOperation, InitializeRequest, InitializedPool};
pub use swap::{SwapOperation, SwapReceipt, SwapRequest};
pub use withdraw::{WithdrawOperation, WithdrawReceipt, WithdrawRequest};

//! Pool executor: runs operations against stored pool accounts and a ledger
//!
//! Each call is one atomic step: decode the stored snapshot, run the pure
//! operation, apply its effects to the ledger, then store the next snapshot.
//! If the ledger rejects any effect nothing is stored and no balance moves.

use crate::effects::LedgerEffect;
use crate::error::{AmmError, LedgerError, Result};
use crate::ledger::{apply_effects, Ledger};
use crate::operations::{
    DepositOperation, DepositReceipt, DepositRequest, InitializeOperation, InitializeRequest,
    LockOperation, SwapOperation, SwapReceipt, SwapRequest, WithdrawOperation, WithdrawReceipt,
    WithdrawRequest,
};
use crate::pool::{PoolAccount, PoolConfig};
use cpmm_types::{AccountId, PoolId};
use std::collections::HashMap;
use tracing::{info, warn};

/// Owns persisted pool accounts (bincode-encoded, keyed by pool identity)
/// and the ledger they settle against
#[derive(Debug, Clone)]
pub struct PoolExecutor<L: Ledger + Clone> {
    ledger: L,
    accounts: HashMap<PoolId, Vec<u8>>,
}

impl<L: Ledger + Clone> PoolExecutor<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            accounts: HashMap::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Decoded snapshot of a stored pool
    pub fn pool(&self, pool_id: &PoolId) -> Result<PoolAccount> {
        let bytes = self
            .accounts
            .get(pool_id)
            .ok_or(AmmError::UnknownPool { pool: *pool_id })?;
        PoolAccount::decode(bytes)
    }

    pub fn pool_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn initialize(&mut self, caller: &AccountId, request: &InitializeRequest) -> Result<PoolId> {
        let created = InitializeOperation::execute(request)?;

        if self.accounts.contains_key(&created.pool_id) {
            warn!(pool = %created.pool_id, "Pool already exists");
            return Err(AmmError::DuplicatePool {
                pool: created.pool_id,
            });
        }

        let account = PoolAccount {
            config: created.config,
            reserves: created.reserves,
        };
        self.settle(&created.pool_id, caller, &account, &created.effects)
            .map_err(|e| match e {
                AmmError::Ledger(LedgerError::ShareMintExists { .. }) => {
                    AmmError::DuplicatePool {
                        pool: created.pool_id,
                    }
                }
                other => other,
            })?;

        info!(pool = %created.pool_id, share_mint = %created.share_mint, "Pool initialized");
        Ok(created.pool_id)
    }

    pub fn deposit(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        request: &DepositRequest,
    ) -> Result<DepositReceipt> {
        let current = self.pool(pool_id)?;
        let transition = DepositOperation::execute(&current.config, &current.reserves, request)?;

        let next = current.with_reserves(transition.reserves);
        self.settle(pool_id, caller, &next, &transition.effects)?;

        info!(
            pool = %pool_id,
            caller = %caller,
            shares = transition.receipt.shares_minted,
            amount_x = transition.receipt.amount_x,
            amount_y = transition.receipt.amount_y,
            "Deposit committed"
        );
        Ok(transition.receipt)
    }

    pub fn swap(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        request: &SwapRequest,
    ) -> Result<SwapReceipt> {
        let current = self.pool(pool_id)?;
        let transition = SwapOperation::execute(&current.config, &current.reserves, request)?;

        let next = current.with_reserves(transition.reserves);
        self.settle(pool_id, caller, &next, &transition.effects)?;

        info!(
            pool = %pool_id,
            caller = %caller,
            direction = ?transition.receipt.direction,
            amount_in = transition.receipt.amount_in,
            amount_out = transition.receipt.amount_out,
            fee = transition.receipt.fee_amount,
            "Swap committed"
        );
        Ok(transition.receipt)
    }

    pub fn withdraw(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        request: &WithdrawRequest,
    ) -> Result<WithdrawReceipt> {
        let current = self.pool(pool_id)?;
        current.config.ensure_unlocked()?;

        let held = self
            .ledger
            .share_balance(&current.config.share_mint(), caller);
        if held < request.shares {
            return Err(AmmError::InsufficientFunds {
                account: *caller,
                required: request.shares,
                available: held,
            });
        }

        let transition = WithdrawOperation::execute(&current.config, &current.reserves, request)?;

        let next = current.with_reserves(transition.reserves);
        self.settle(pool_id, caller, &next, &transition.effects)?;

        info!(
            pool = %pool_id,
            caller = %caller,
            shares = transition.receipt.shares_burned,
            amount_x = transition.receipt.amount_x,
            amount_y = transition.receipt.amount_y,
            "Withdraw committed"
        );
        Ok(transition.receipt)
    }

    pub fn set_locked(&mut self, pool_id: &PoolId, caller: &AccountId, locked: bool) -> Result<PoolConfig> {
        let current = self.pool(pool_id)?;
        let config = LockOperation::execute(&current.config, caller, locked)?;

        let next = PoolAccount {
            config: config.clone(),
            reserves: current.reserves,
        };
        self.settle(pool_id, caller, &next, &[])?;
        Ok(config)
    }

    /// Apply effects, then store `next`; neither happens unless both can
    ///
    /// The pool's own vault account can never act as the caller.
    fn settle(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        next: &PoolAccount,
        effects: &[LedgerEffect],
    ) -> Result<()> {
        // Vault self-transfers would be no-ops while reserves still move
        if *caller == pool_id.vault_account() {
            warn!(pool = %pool_id, "Pool vault used as caller");
            return Err(AmmError::Unauthorized { caller: *caller });
        }

        let encoded = next.encode()?;
        apply_effects(&mut self.ledger, pool_id, caller, effects)?;
        self.accounts.insert(*pool_id, encoded);
        Ok(())
    }
}

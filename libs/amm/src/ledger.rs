//! Host ledger contract
//!
//! The pool core only describes movements; a [`Ledger`] executes them.
//! [`InMemoryLedger`] is a hash-map implementation used for simulation and
//! tests. [`apply_effects`] gives any cloneable ledger all-or-nothing
//! semantics for one action.

use crate::effects::LedgerEffect;
use crate::error::LedgerError;
use cpmm_types::{AccountId, AssetId, PoolId, ShareMintId};
use std::collections::HashMap;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Balances, transfers and share-mint supply as seen by the pool core
pub trait Ledger {
    fn balance(&self, asset: &AssetId, account: &AccountId) -> u64;

    fn share_balance(&self, mint: &ShareMintId, account: &AccountId) -> u64;

    /// `None` if the mint was never created
    fn share_supply(&self, mint: &ShareMintId) -> Option<u64>;

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> LedgerResult<()>;

    fn create_share_mint(&mut self, mint: &ShareMintId) -> LedgerResult<()>;

    fn mint_shares(&mut self, mint: &ShareMintId, to: &AccountId, amount: u64) -> LedgerResult<()>;

    fn burn_shares(&mut self, mint: &ShareMintId, from: &AccountId, amount: u64) -> LedgerResult<()>;
}

/// Apply one action's effects for `caller` against `pool`'s vault
///
/// Effects run in order on a scratch copy; the real ledger is only replaced
/// once every effect has succeeded.
pub fn apply_effects<L: Ledger + Clone>(
    ledger: &mut L,
    pool: &PoolId,
    caller: &AccountId,
    effects: &[LedgerEffect],
) -> LedgerResult<()> {
    let vault = pool.vault_account();
    let mut scratch = ledger.clone();

    for effect in effects {
        match *effect {
            LedgerEffect::CreateShareMint { mint } => scratch.create_share_mint(&mint)?,
            LedgerEffect::TransferIn { asset, amount } => {
                scratch.transfer(&asset, caller, &vault, amount)?
            }
            LedgerEffect::TransferOut { asset, amount } => {
                scratch.transfer(&asset, &vault, caller, amount)?
            }
            LedgerEffect::MintShares { mint, amount } => scratch.mint_shares(&mint, caller, amount)?,
            LedgerEffect::BurnShares { mint, amount } => scratch.burn_shares(&mint, caller, amount)?,
        }
    }

    *ledger = scratch;
    Ok(())
}

/// Hash-map ledger holding asset balances and share mints
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(AssetId, AccountId), u64>,
    shares: HashMap<(ShareMintId, AccountId), u64>,
    supplies: HashMap<ShareMintId, u64>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `asset` out of thin air (test funding)
    pub fn credit(&mut self, asset: AssetId, account: AccountId, amount: u64) -> LedgerResult<()> {
        let balance = self.balances.entry((asset, account)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        Ok(())
    }

    fn debit(&mut self, asset: &AssetId, account: &AccountId, amount: u64) -> LedgerResult<()> {
        let available = self.balance(asset, account);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                account: *account,
                required: amount,
                available,
            });
        }
        self.balances.insert((*asset, *account), available - amount);
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, asset: &AssetId, account: &AccountId) -> u64 {
        self.balances.get(&(*asset, *account)).copied().unwrap_or(0)
    }

    fn share_balance(&self, mint: &ShareMintId, account: &AccountId) -> u64 {
        self.shares.get(&(*mint, *account)).copied().unwrap_or(0)
    }

    fn share_supply(&self, mint: &ShareMintId) -> Option<u64> {
        self.supplies.get(mint).copied()
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> LedgerResult<()> {
        if from == to {
            // Still require the funds to exist
            let available = self.balance(asset, from);
            if available < amount {
                return Err(LedgerError::InsufficientFunds {
                    account: *from,
                    required: amount,
                    available,
                });
            }
            return Ok(());
        }

        // Check the credit side first so a failure leaves nothing half-done
        let received = self
            .balance(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.debit(asset, from, amount)?;
        self.balances.insert((*asset, *to), received);
        Ok(())
    }

    fn create_share_mint(&mut self, mint: &ShareMintId) -> LedgerResult<()> {
        if self.supplies.contains_key(mint) {
            return Err(LedgerError::ShareMintExists { mint: *mint });
        }
        self.supplies.insert(*mint, 0);
        Ok(())
    }

    fn mint_shares(&mut self, mint: &ShareMintId, to: &AccountId, amount: u64) -> LedgerResult<()> {
        let supply = self
            .supplies
            .get(mint)
            .copied()
            .ok_or(LedgerError::UnknownShareMint { mint: *mint })?;

        let new_supply = supply
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        let new_balance = self
            .share_balance(mint, to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        self.supplies.insert(*mint, new_supply);
        self.shares.insert((*mint, *to), new_balance);
        Ok(())
    }

    fn burn_shares(&mut self, mint: &ShareMintId, from: &AccountId, amount: u64) -> LedgerResult<()> {
        let supply = self
            .supplies
            .get(mint)
            .copied()
            .ok_or(LedgerError::UnknownShareMint { mint: *mint })?;

        let held = self.share_balance(mint, from);
        if held < amount {
            return Err(LedgerError::InsufficientFunds {
                account: *from,
                required: amount,
                available: held,
            });
        }

        self.shares.insert((*mint, *from), held - amount);
        self.supplies.insert(*mint, supply.saturating_sub(amount));
        Ok(())
    }
}

//! External ledger effects produced by pool operations
//!
//! Operations never move funds themselves. They return the ordered list of
//! effects the host must apply atomically, all relative to the calling
//! account and the pool's vault account.

use crate::pool::ReserveLedger;
use cpmm_types::{AssetId, ShareMintId};
use serde::{Deserialize, Serialize};

/// One required movement against the host ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEffect {
    /// Create the pool's share mint with the pool as sole authority
    CreateShareMint { mint: ShareMintId },
    /// Caller pays `amount` of `asset` into the pool vault
    TransferIn { asset: AssetId, amount: u64 },
    /// Pool vault pays `amount` of `asset` to the caller
    TransferOut { asset: AssetId, amount: u64 },
    /// New shares credited to the caller
    MintShares { mint: ShareMintId, amount: u64 },
    /// Shares debited from the caller and destroyed
    BurnShares { mint: ShareMintId, amount: u64 },
}

/// Result of a state-changing operation: what happened, the next reserve
/// snapshot, and the effects that make it real
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<R> {
    pub receipt: R,
    pub reserves: ReserveLedger,
    pub effects: Vec<LedgerEffect>,
}

/// Ordered effect builder that drops zero-amount movements
#[derive(Debug, Default)]
pub(crate) struct EffectList(Vec<LedgerEffect>);

impl EffectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_share_mint(mut self, mint: ShareMintId) -> Self {
        self.0.push(LedgerEffect::CreateShareMint { mint });
        self
    }

    pub fn transfer_in(mut self, asset: AssetId, amount: u64) -> Self {
        if amount > 0 {
            self.0.push(LedgerEffect::TransferIn { asset, amount });
        }
        self
    }

    pub fn transfer_out(mut self, asset: AssetId, amount: u64) -> Self {
        if amount > 0 {
            self.0.push(LedgerEffect::TransferOut { asset, amount });
        }
        self
    }

    pub fn mint_shares(mut self, mint: ShareMintId, amount: u64) -> Self {
        if amount > 0 {
            self.0.push(LedgerEffect::MintShares { mint, amount });
        }
        self
    }

    pub fn burn_shares(mut self, mint: ShareMintId, amount: u64) -> Self {
        if amount > 0 {
            self.0.push(LedgerEffect::BurnShares { mint, amount });
        }
        self
    }

    pub fn into_vec(self) -> Vec<LedgerEffect> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_movements_are_dropped() {
        let asset = AssetId::new([1u8; 32]);
        let mint = ShareMintId::new([2u8; 32]);

        let effects = EffectList::new()
            .transfer_in(asset, 0)
            .transfer_out(asset, 5)
            .mint_shares(mint, 0)
            .burn_shares(mint, 3)
            .into_vec();

        assert_eq!(
            effects,
            vec![
                LedgerEffect::TransferOut { asset, amount: 5 },
                LedgerEffect::BurnShares { mint, amount: 3 },
            ]
        );
    }
}

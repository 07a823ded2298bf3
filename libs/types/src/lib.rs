//! # CPMM Types
//!
//! Identifier types shared by the pool accounting core and its host ledger.
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Assets, accounts, pools and share mints are distinct
//!   32-byte wrappers, so an asset can never be passed where an account is
//!   expected
//! - **Deterministic Identity**: Pool and share-mint identities are derived
//!   from their seed material, no registry required
//!
//! ## Quick Start
//!
//! ```rust
//! use cpmm_types::{derive_pool_id, derive_share_mint_id, AssetId};
//!
//! let usdc = AssetId::new([1u8; 32]);
//! let wsol = AssetId::new([2u8; 32]);
//!
//! let pool = derive_pool_id(&usdc, &wsol, 7);
//! let shares = derive_share_mint_id(&pool);
//! assert_ne!(pool.into_inner(), shares.into_inner());
//! ```

pub mod derivation;
pub mod errors;
pub mod identifiers;

pub use derivation::{derive_identity, derive_pool_id, derive_share_mint_id, POOL_DOMAIN, SHARE_MINT_DOMAIN};
pub use errors::IdentityError;
pub use identifiers::{AccountId, AssetId, PoolId, ShareMintId};

// Used by `define_typed_wrapper!` expansions in downstream crates
#[doc(hidden)]
pub use hex as __hex;
#[doc(hidden)]
pub use serde as __serde;

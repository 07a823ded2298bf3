//! Deterministic identity derivation
//!
//! Identities are Keccak-256 digests over a domain tag followed by the seed
//! material, so the same inputs always land on the same pool and clients can
//! locate an existing pool without a registry lookup.

use crate::identifiers::{AssetId, PoolId, ShareMintId, IDENTITY_LEN};
use sha3::{Digest, Keccak256};

/// Domain tag for pool identities
pub const POOL_DOMAIN: &[u8] = b"cpmm/pool";

/// Domain tag for liquidity-share mint identities
pub const SHARE_MINT_DOMAIN: &[u8] = b"cpmm/shares";

/// Hash a domain tag and seed parts into a 32-byte identity
pub fn derive_identity(domain: &[u8], parts: &[&[u8]]) -> [u8; IDENTITY_LEN] {
    let mut hasher = Keccak256::new();
    hasher.update(domain);
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();

    let mut out = [0u8; IDENTITY_LEN];
    out.copy_from_slice(&digest);
    out
}

/// Pool identity from its ordered asset pair and seed
///
/// Order matters: `(x, y)` and `(y, x)` name different pools.
pub fn derive_pool_id(asset_x: &AssetId, asset_y: &AssetId, seed: u64) -> PoolId {
    PoolId::new(derive_identity(
        POOL_DOMAIN,
        &[asset_x.as_bytes(), asset_y.as_bytes(), &seed.to_le_bytes()],
    ))
}

/// Share-mint identity owned by `pool`
pub fn derive_share_mint_id(pool: &PoolId) -> ShareMintId {
    ShareMintId::new(derive_identity(SHARE_MINT_DOMAIN, &[pool.as_bytes()]))
}

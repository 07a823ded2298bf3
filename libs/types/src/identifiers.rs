//! # Typed 32-byte Identifiers
//!
//! Every entity the pool core talks about is named by 32 bytes: the two
//! tradable assets, the accounts that hold balances, the pool itself and the
//! pool's liquidity-share mint. Wrapping each in its own type turns argument
//! mix-ups into compile errors:
//!
//! ```rust
//! use cpmm_types::{AccountId, AssetId};
//!
//! fn balance_of(asset: AssetId, owner: AccountId) -> u64 {
//!     0
//! }
//!
//! let asset = AssetId::new([1u8; 32]);
//! let owner = AccountId::new([2u8; 32]);
//! balance_of(asset, owner); // ✅ Works
//! // balance_of(owner, asset); // ❌ Compile error!
//! ```
//!
//! Identifiers display as `Name(0x…)` and parse from plain or `0x`-prefixed hex.

use crate::errors::IdentityError;

/// Width of every identifier in bytes
pub const IDENTITY_LEN: usize = 32;

/// Macro for generating typed 32-byte identifier wrappers
///
/// Creates a `Copy` newtype over `[u8; 32]` with hex display/parsing,
/// conversions and transparent serde support.
#[macro_export]
macro_rules! define_typed_wrapper {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub [u8; $crate::identifiers::IDENTITY_LEN]);

        impl $name {
            /// Create a new typed wrapper
            #[inline(always)]
            pub const fn new(inner: [u8; $crate::identifiers::IDENTITY_LEN]) -> Self {
                Self(inner)
            }

            /// Extract the inner value by value
            #[inline(always)]
            pub const fn into_inner(self) -> [u8; $crate::identifiers::IDENTITY_LEN] {
                self.0
            }

            #[inline(always)]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Lowercase hex without prefix
            pub fn to_hex(&self) -> String {
                $crate::__hex::encode(self.0)
            }

            /// Parse from hex, with or without a `0x` prefix
            pub fn from_hex(input: &str) -> Result<Self, $crate::errors::IdentityError> {
                $crate::identifiers::parse_hex_identity(input).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::IdentityError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $crate::identifiers::IDENTITY_LEN]> for $name {
            #[inline(always)]
            fn from(inner: [u8; $crate::identifiers::IDENTITY_LEN]) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for [u8; $crate::identifiers::IDENTITY_LEN] {
            #[inline(always)]
            fn from(wrapper: $name) -> [u8; $crate::identifiers::IDENTITY_LEN] {
                wrapper.0
            }
        }

        impl AsRef<[u8; $crate::identifiers::IDENTITY_LEN]> for $name {
            #[inline(always)]
            fn as_ref(&self) -> &[u8; $crate::identifiers::IDENTITY_LEN] {
                &self.0
            }
        }

        // Serialization support - serializes the inner bytes directly
        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                $crate::__serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                <[u8; $crate::identifiers::IDENTITY_LEN] as $crate::__serde::Deserialize<'de>>::deserialize(
                    deserializer,
                )
                .map(Self)
            }
        }
    };
}

define_typed_wrapper!(
    /// Identity of a tradable asset (token mint)
    AssetId
);

define_typed_wrapper!(
    /// Identity of a balance-holding account in the host ledger
    AccountId
);

define_typed_wrapper!(
    /// Identity of a pool, derived from its asset pair and seed
    PoolId
);

define_typed_wrapper!(
    /// Identity of a pool's liquidity-share mint
    ShareMintId
);

impl PoolId {
    /// The ledger account that custodies this pool's reserves
    pub fn vault_account(&self) -> AccountId {
        AccountId(self.0)
    }
}

#[doc(hidden)]
pub fn parse_hex_identity(input: &str) -> Result<[u8; IDENTITY_LEN], IdentityError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(|_| IdentityError::InvalidHex {
        input: input.to_string(),
    })?;

    if bytes.len() != IDENTITY_LEN {
        return Err(IdentityError::InvalidLength {
            expected: IDENTITY_LEN,
            actual: bytes.len(),
        });
    }

    let mut out = [0u8; IDENTITY_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}

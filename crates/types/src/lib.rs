//! Core records for the bondset validator-set keeper.
//!
//! This crate provides the types persisted and exchanged by the keeper:
//!
//! - **Identity**: [`Address`], [`PubKey`], [`BlockHeight`]
//! - **Arithmetic**: [`Shares`] (exact rationals) and [`Power`]
//! - **Records**: [`Validator`], [`Delegation`], [`Params`], [`Pool`]
//! - **Consensus output**: [`ValidatorUpdate`]
//!
//! Every persisted record derives SBOR so that encoding is deterministic
//! across replicas. Genesis-facing records also derive serde.
//!
//! # Design Philosophy
//!
//! This crate does not depend on any other workspace crate, making it the
//! foundation layer.

mod address;
mod delegation;
mod identifiers;
mod params;
mod shares;
mod validator;

pub use address::{Address, HexError, PubKey};
pub use delegation::Delegation;
pub use identifiers::BlockHeight;
pub use params::{Params, Pool, DEFAULT_BOND_DENOM, DEFAULT_MAX_VALIDATORS};
pub use shares::{Power, Shares, SharesParseError};
pub use validator::{Description, Validator, ValidatorUpdate};

/// Test utilities.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    use super::*;

    /// Create a test consensus key from a seed byte.
    pub fn test_pub_key(seed: u8) -> PubKey {
        let hash = blake3::hash(&[b'k', seed]);
        PubKey::new(*hash.as_bytes())
    }

    /// Create a test delegator address from a seed byte.
    pub fn test_address(seed: u8) -> Address {
        Address::new([seed; 20])
    }

    /// Create a validator for `seed` with equal bonded and delegator shares.
    pub fn test_validator(seed: u8, shares: i64) -> Validator {
        Validator::new(
            test_pub_key(seed),
            Description::with_moniker(format!("validator-{seed}")),
        )
        .with_shares(Shares::from_integer(shares))
    }
}

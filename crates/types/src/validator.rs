//! Validator records.

use crate::{Address, BlockHeight, Power, PubKey, Shares};
use sbor::prelude::*;
use serde::{Deserialize, Serialize};

/// Free-form validator metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, BasicSbor, Serialize, Deserialize)]
pub struct Description {
    /// Human-readable name.
    pub moniker: String,
    /// Optional identity signature (e.g. a keybase id).
    pub identity: String,
    /// Optional website.
    pub website: String,
    /// Optional details.
    pub details: String,
}

impl Description {
    /// Description carrying only a moniker.
    pub fn with_moniker(moniker: impl Into<String>) -> Self {
        Self {
            moniker: moniker.into(),
            ..Self::default()
        }
    }
}

/// A registered validator and its stake.
///
/// `bond_height` and `update_seq` are managed by the keeper: they are stamped
/// when the validator is created or its bonded shares change, and are the
/// tie-breakers between validators of equal power.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor, Serialize, Deserialize)]
pub struct Validator {
    /// Address derived from `pub_key`.
    pub address: Address,

    /// Consensus public key. Immutable once the validator exists.
    pub pub_key: PubKey,

    /// Metadata.
    pub description: Description,

    /// Stake weight attributed to this validator. Determines its power.
    pub bonded_shares: Shares,

    /// Total shares issued to delegators against this validator's pool.
    pub delegator_shares: Shares,

    /// Height at which this validator's power last transitioned.
    pub bond_height: BlockHeight,

    /// Keeper counter value at this validator's last power transition.
    pub update_seq: u64,
}

impl Validator {
    /// Create an unbonded validator for a consensus key.
    pub fn new(pub_key: PubKey, description: Description) -> Self {
        Self {
            address: pub_key.address(),
            pub_key,
            description,
            bonded_shares: Shares::zero(),
            delegator_shares: Shares::zero(),
            bond_height: BlockHeight::GENESIS,
            update_seq: 0,
        }
    }

    /// Builder-style helper setting both bonded and delegator shares.
    pub fn with_shares(mut self, shares: Shares) -> Self {
        self.delegator_shares = shares.clone();
        self.bonded_shares = shares;
        self
    }

    /// Voting power derived from the bonded shares.
    ///
    /// Negative or oversized shares yield zero; the keeper rejects such
    /// records before they reach the store.
    pub fn power(&self) -> Power {
        self.bonded_shares.to_power().unwrap_or(Power::ZERO)
    }

    /// Whether this validator has any bonded shares.
    pub fn is_bonded(&self) -> bool {
        self.bonded_shares.is_positive()
    }

    /// Whether the caller-controlled fields match, ignoring the keeper-managed
    /// `bond_height` and `update_seq` stamps.
    pub fn same_state(&self, other: &Validator) -> bool {
        self.address == other.address
            && self.pub_key == other.pub_key
            && self.description == other.description
            && self.bonded_shares == other.bonded_shares
            && self.delegator_shares == other.delegator_shares
    }

    /// The update announcing this validator at its current power.
    pub fn to_update(&self) -> ValidatorUpdate {
        ValidatorUpdate {
            pub_key: self.pub_key,
            power: self.power(),
        }
    }
}

/// A power change for the consensus engine.
///
/// Power `0` instructs the engine to drop the validator from its active set;
/// any other value sets or inserts it at that power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BasicSbor, Serialize, Deserialize)]
pub struct ValidatorUpdate {
    /// Identity the engine knows the validator by.
    pub pub_key: PubKey,

    /// New power.
    pub power: Power,
}

impl ValidatorUpdate {
    /// Update removing a validator from the active set.
    pub fn removal(pub_key: PubKey) -> Self {
        Self {
            pub_key,
            power: Power::ZERO,
        }
    }

    /// Whether this update removes the validator.
    pub fn is_removal(&self) -> bool {
        self.power.is_zero()
    }
}

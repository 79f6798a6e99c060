//! Delegation records.

use crate::{Address, BlockHeight, Shares};
use sbor::prelude::*;
use serde::{Deserialize, Serialize};

/// Shares of a validator's pool owned by one delegator.
///
/// Identified by the `(delegator_addr, validator_addr)` pair.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor, Serialize, Deserialize)]
pub struct Delegation {
    /// Owner of the shares.
    pub delegator_addr: Address,

    /// Validator the shares were issued by.
    pub validator_addr: Address,

    /// Amount of the validator's issued shares owned.
    pub shares: Shares,

    /// Height of the last update. Informational only.
    pub height: BlockHeight,
}

impl Delegation {
    /// Create a delegation record.
    pub fn new(
        delegator_addr: Address,
        validator_addr: Address,
        shares: Shares,
        height: BlockHeight,
    ) -> Self {
        Self {
            delegator_addr,
            validator_addr,
            shares,
            height,
        }
    }
}

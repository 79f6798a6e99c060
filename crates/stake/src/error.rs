//! Keeper errors.

use bondset_types::Address;
use thiserror::Error;

/// Errors returned by keeper operations.
///
/// Absence is never an error: lookups return `Option` and removals of
/// absent records are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakeError {
    /// A stored record failed to decode.
    #[error("SBOR decode error: {0}")]
    Decode(String),

    /// A record failed to encode.
    #[error("SBOR encode error: {0}")]
    Encode(String),

    /// The validator's address is not the one derived from its key.
    #[error("address {address} does not match the address derived from its public key ({derived})")]
    AddressMismatch {
        /// Address carried by the record.
        address: Address,
        /// Address derived from the record's key.
        derived: Address,
    },

    /// An existing validator was written with a different consensus key.
    #[error("public key of validator {address} cannot change")]
    PubKeyChanged {
        /// The validator.
        address: Address,
    },

    /// A share amount was negative.
    #[error("validator {address} has negative shares")]
    NegativeShares {
        /// The validator.
        address: Address,
    },

    /// Bonded shares exceed the representable power range.
    #[error("bonded shares of validator {address} overflow the power range")]
    PowerOverflow {
        /// The validator.
        address: Address,
    },

    /// The power index names a validator that has no record.
    #[error("power index references missing validator {address}")]
    IndexInconsistent {
        /// The dangling address.
        address: Address,
    },

    /// A genesis state failed validation.
    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),
}

impl StakeError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            StakeError::Decode(_) => "decode",
            StakeError::Encode(_) => "encode",
            StakeError::AddressMismatch { .. } => "address_mismatch",
            StakeError::PubKeyChanged { .. } => "pub_key_changed",
            StakeError::NegativeShares { .. } => "negative_shares",
            StakeError::PowerOverflow { .. } => "power_overflow",
            StakeError::IndexInconsistent { .. } => "index_inconsistent",
            StakeError::InvalidGenesis(_) => "invalid_genesis",
        }
    }
}

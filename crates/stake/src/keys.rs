//! Storage key scheme.
//!
//! ```text
//! 0x00                                         params
//! 0x01                                         pool
//! 0x02                                         next update sequence number
//! 0x03                                         active set as of the last diff cycle
//! 0x04                                         pending consensus updates
//! 0x10 | address                               validator record
//! 0x11 | !power | bond_height | seq | address  power index entry -> address
//! 0x20 | delegator | validator                 delegation record
//! ```
//!
//! All integers are big-endian. Power is stored bit-inverted so that an
//! ascending scan of the power index visits validators in rank order.

use bondset_storage::keys::concat;
use bondset_types::{Address, Validator};

pub(crate) const PARAMS_KEY: &[u8] = &[0x00];
pub(crate) const POOL_KEY: &[u8] = &[0x01];
pub(crate) const UPDATE_SEQ_KEY: &[u8] = &[0x02];
pub(crate) const ACTIVE_SET_KEY: &[u8] = &[0x03];
pub(crate) const PENDING_UPDATES_KEY: &[u8] = &[0x04];

pub(crate) const VALIDATOR_PREFIX: &[u8] = &[0x10];
pub(crate) const POWER_INDEX_PREFIX: &[u8] = &[0x11];
pub(crate) const DELEGATION_PREFIX: &[u8] = &[0x20];

pub(crate) fn validator_key(address: &Address) -> Vec<u8> {
    concat(&[VALIDATOR_PREFIX, address.as_bytes()])
}

/// Power index key for `validator`, or `None` when it has no power.
///
/// Ordering: power descending, then bond height, update sequence and
/// address ascending.
pub(crate) fn power_index_key(validator: &Validator) -> Option<Vec<u8>> {
    let power = validator.power();
    if power.is_zero() {
        return None;
    }
    Some(concat(&[
        POWER_INDEX_PREFIX,
        &(!power.0).to_be_bytes(),
        &validator.bond_height.0.to_be_bytes(),
        &validator.update_seq.to_be_bytes(),
        validator.address.as_bytes(),
    ]))
}

pub(crate) fn delegation_key(delegator: &Address, validator: &Address) -> Vec<u8> {
    concat(&[DELEGATION_PREFIX, delegator.as_bytes(), validator.as_bytes()])
}

pub(crate) fn delegator_prefix(delegator: &Address) -> Vec<u8> {
    concat(&[DELEGATION_PREFIX, delegator.as_bytes()])
}

//! Delegation store.
//!
//! Records are keyed by `(delegator, validator)`, so a prefix scan over one
//! delegator yields its delegations in validator address order and a scan
//! over the whole store yields delegator then validator order. Delegations
//! are not cross-checked against the validator store.

use crate::codec::decode;
use crate::keys;
use crate::{Keeper, StakeError};
use bondset_storage::keys::{next_prefix, successor};
use bondset_storage::KvStore;
use bondset_types::{Address, Delegation};
use tracing::trace;

impl<S: KvStore> Keeper<S> {
    /// Insert or overwrite the delegation for its `(delegator, validator)` pair.
    pub fn set_delegation(&mut self, delegation: &Delegation) -> Result<(), StakeError> {
        trace!(
            delegator = %delegation.delegator_addr,
            validator = %delegation.validator_addr,
            shares = %delegation.shares,
            "Delegation written"
        );
        self.write(
            keys::delegation_key(&delegation.delegator_addr, &delegation.validator_addr),
            delegation,
        )
    }

    /// Look up the delegation of `delegator` to `validator`.
    pub fn get_delegation(
        &self,
        delegator: &Address,
        validator: &Address,
    ) -> Result<Option<Delegation>, StakeError> {
        self.read(&keys::delegation_key(delegator, validator))
    }

    /// Delete the delegation for the pair named by `delegation`. A no-op if
    /// absent.
    pub fn remove_delegation(&mut self, delegation: &Delegation) {
        trace!(
            delegator = %delegation.delegator_addr,
            validator = %delegation.validator_addr,
            "Delegation removed"
        );
        self.store.delete(&keys::delegation_key(
            &delegation.delegator_addr,
            &delegation.validator_addr,
        ));
    }

    /// Up to `limit` delegations of `delegator`, by validator address.
    pub fn get_delegations(
        &self,
        delegator: &Address,
        limit: usize,
    ) -> Result<Vec<Delegation>, StakeError> {
        self.store
            .prefix_iter(&keys::delegator_prefix(delegator))
            .take(limit)
            .map(|(_, bytes)| decode(&bytes))
            .collect()
    }

    /// Up to `limit` delegations across all delegators, by delegator then
    /// validator address.
    pub fn get_bonds(&self, limit: usize) -> Result<Vec<Delegation>, StakeError> {
        self.get_bonds_after(None, limit)
    }

    /// Resume a [`get_bonds`](Self::get_bonds) scan strictly after the pair
    /// `(delegator, validator)`.
    ///
    /// Passing the last pair of one page yields the next page.
    pub fn get_bonds_after(
        &self,
        after: Option<(&Address, &Address)>,
        limit: usize,
    ) -> Result<Vec<Delegation>, StakeError> {
        let start = match after {
            Some((delegator, validator)) => successor(&keys::delegation_key(delegator, validator)),
            None => keys::DELEGATION_PREFIX.to_vec(),
        };
        let end = next_prefix(keys::DELEGATION_PREFIX);
        self.store
            .range(&start, end.as_deref())
            .take(limit)
            .map(|(_, bytes)| decode(&bytes))
            .collect()
    }
}

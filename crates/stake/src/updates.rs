//! Update tracker: pending power changes for the consensus engine.
//!
//! Entries are keyed by validator address and kept in the order they were
//! first generated. Each entry remembers the power the engine last received
//! for that validator (its baseline) so that a change that is later undone
//! before delivery cancels out.

use crate::keys;
use crate::{Keeper, StakeError};
use bondset_storage::KvStore;
use bondset_types::{Address, Power, PubKey, ValidatorUpdate};
use sbor::prelude::*;
use tracing::debug;

/// One pending notification.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub(crate) struct PendingUpdate {
    pub address: Address,
    pub pub_key: PubKey,
    pub power: Power,
    /// Power as of the last delivery; `0` when the engine does not know the
    /// validator.
    pub baseline: Power,
}

/// The pending set, persisted as one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, BasicSbor)]
pub(crate) struct PendingUpdates {
    entries: Vec<PendingUpdate>,
}

impl PendingUpdates {
    /// Record that `address` now has `power`, having had `baseline` in the
    /// previous active set.
    pub fn record(&mut self, address: Address, pub_key: PubKey, power: Power, baseline: Power) {
        match self.entries.iter().position(|e| e.address == address) {
            Some(pos) if self.entries[pos].baseline == power => {
                self.entries.remove(pos);
            }
            Some(pos) => self.entries[pos].power = power,
            None => self.entries.push(PendingUpdate {
                address,
                pub_key,
                power,
                baseline,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_updates(&self) -> Vec<ValidatorUpdate> {
        self.entries
            .iter()
            .map(|e| ValidatorUpdate {
                pub_key: e.pub_key,
                power: e.power,
            })
            .collect()
    }
}

impl<S: KvStore> Keeper<S> {
    pub(crate) fn load_pending_updates(&self) -> Result<PendingUpdates, StakeError> {
        Ok(self.read(keys::PENDING_UPDATES_KEY)?.unwrap_or_default())
    }

    pub(crate) fn save_pending_updates(&mut self, pending: &PendingUpdates) -> Result<(), StakeError> {
        bondset_metrics::set_pending_updates(pending.len());
        if pending.is_empty() {
            self.store.delete(keys::PENDING_UPDATES_KEY);
            return Ok(());
        }
        self.write(keys::PENDING_UPDATES_KEY.to_vec(), pending)
    }

    /// Pending power changes in the order they were generated.
    ///
    /// Power `0` removes the validator from the engine's active set. The
    /// set is not drained by reading it; call
    /// [`clear_tendermint_updates`](Self::clear_tendermint_updates) once the
    /// engine has applied it.
    pub fn get_tendermint_updates(&self) -> Result<Vec<ValidatorUpdate>, StakeError> {
        Ok(self.load_pending_updates()?.to_updates())
    }

    /// Empty the pending set.
    pub fn clear_tendermint_updates(&mut self) -> Result<(), StakeError> {
        let cleared = self.load_pending_updates()?.len();
        self.store.delete(keys::PENDING_UPDATES_KEY);
        debug!(cleared, "Cleared pending validator updates");
        bondset_metrics::record_updates_cleared(cleared);
        bondset_metrics::set_pending_updates(0);
        Ok(())
    }
}

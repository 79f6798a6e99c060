//! Validator store: the primary record of every registered validator.

use crate::keys;
use crate::{BlockContext, Keeper, StakeError};
use bondset_storage::KvStore;
use bondset_types::{Address, Validator};
use tracing::{debug, warn};

impl<S: KvStore> Keeper<S> {
    /// Insert or update a validator.
    ///
    /// A new validator, or one whose bonded shares changed, is stamped with
    /// the current block height and the next update sequence number; an
    /// otherwise-modified validator keeps its stamps. The power index entry
    /// is replaced in the same call and the active-set diff cycle runs
    /// afterwards.
    ///
    /// Returns the record as stored.
    pub fn set_validator(
        &mut self,
        ctx: &BlockContext,
        mut validator: Validator,
    ) -> Result<Validator, StakeError> {
        let existing = match self.check_validator(&validator) {
            Ok(existing) => existing,
            Err(e) => {
                warn!(address = %validator.address, error = %e, "Rejected validator write");
                bondset_metrics::record_validator_rejected(e.reason());
                return Err(e);
            }
        };

        match &existing {
            Some(stored) if stored.bonded_shares == validator.bonded_shares => {
                validator.bond_height = stored.bond_height;
                validator.update_seq = stored.update_seq;
            }
            _ => {
                validator.bond_height = ctx.height;
                validator.update_seq = self.next_update_seq()?;
            }
        }

        let old_index_key = existing.as_ref().and_then(keys::power_index_key);
        let new_index_key = keys::power_index_key(&validator);
        if old_index_key != new_index_key {
            if let Some(old) = old_index_key {
                self.store.delete(&old);
            }
            if let Some(new) = new_index_key {
                self.store.set(new, validator.address.as_bytes().to_vec());
            }
        }
        self.write(keys::validator_key(&validator.address), &validator)?;

        debug!(
            address = %validator.address,
            power = %validator.power(),
            bond_height = %validator.bond_height,
            update_seq = validator.update_seq,
            created = existing.is_none(),
            "Validator written"
        );
        bondset_metrics::record_validator_written();

        self.refresh_active_set()?;
        Ok(validator)
    }

    /// Validate a write and return the currently stored record, if any.
    fn check_validator(&self, validator: &Validator) -> Result<Option<Validator>, StakeError> {
        let address = validator.address;
        let derived = validator.pub_key.address();
        if derived != address {
            return Err(StakeError::AddressMismatch { address, derived });
        }
        if validator.bonded_shares.is_negative() || validator.delegator_shares.is_negative() {
            return Err(StakeError::NegativeShares { address });
        }
        if validator.bonded_shares.to_power().is_none() {
            return Err(StakeError::PowerOverflow { address });
        }

        let existing = self.get_validator(&address)?;
        if let Some(stored) = &existing {
            if stored.pub_key != validator.pub_key {
                return Err(StakeError::PubKeyChanged { address });
            }
        }
        Ok(existing)
    }

    /// Look up a validator by address.
    pub fn get_validator(&self, address: &Address) -> Result<Option<Validator>, StakeError> {
        self.read(&keys::validator_key(address))
    }

    /// Delete a validator and its power index entry.
    ///
    /// If it was in the active set the diff cycle reports its removal.
    /// Removing an absent validator is a no-op.
    pub fn remove_validator(
        &mut self,
        ctx: &BlockContext,
        address: &Address,
    ) -> Result<(), StakeError> {
        let Some(stored) = self.get_validator(address)? else {
            debug!(%address, "Remove of unknown validator ignored");
            return Ok(());
        };

        if let Some(index_key) = keys::power_index_key(&stored) {
            self.store.delete(&index_key);
        }
        self.store.delete(&keys::validator_key(address));

        debug!(%address, height = %ctx.height, "Validator removed");
        bondset_metrics::record_validator_removed();

        self.refresh_active_set()
    }

    /// Every validator with positive bonded shares, by address ascending.
    pub fn get_validators_bonded(&self) -> Result<Vec<Validator>, StakeError> {
        let mut bonded = Vec::new();
        for (_, bytes) in self.store.prefix_iter(keys::VALIDATOR_PREFIX) {
            let validator: Validator = crate::codec::decode(&bytes)?;
            if validator.is_bonded() {
                bonded.push(validator);
            }
        }
        Ok(bonded)
    }

    /// Every validator in the store, by address ascending.
    pub fn get_all_validators(&self) -> Result<Vec<Validator>, StakeError> {
        self.store
            .prefix_iter(keys::VALIDATOR_PREFIX)
            .map(|(_, bytes)| crate::codec::decode(&bytes))
            .collect()
    }
}

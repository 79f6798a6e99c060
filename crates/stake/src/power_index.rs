//! Power index scans and the active-set diff cycle.

use crate::keys;
use crate::{Keeper, StakeError};
use bondset_storage::KvStore;
use bondset_types::{Address, Power, PubKey, Validator};
use sbor::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A member of the active set as of the last diff cycle.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub(crate) struct ActiveEntry {
    pub address: Address,
    pub pub_key: PubKey,
    pub power: Power,
}

impl From<&Validator> for ActiveEntry {
    fn from(v: &Validator) -> Self {
        Self {
            address: v.address,
            pub_key: v.pub_key,
            power: v.power(),
        }
    }
}

impl<S: KvStore> Keeper<S> {
    /// The active validator set: the top `max_validators` validators with
    /// positive power, in rank order.
    ///
    /// Rank is power descending, then bond height, update sequence and
    /// address ascending.
    pub fn get_validators_bonded_by_power(&self) -> Result<Vec<Validator>, StakeError> {
        let max = usize::from(self.get_params()?.max_validators);
        self.store
            .prefix_iter(keys::POWER_INDEX_PREFIX)
            .take(max)
            .map(|(_, value)| {
                let address = Address::from_slice(&value)
                    .map_err(|e| StakeError::Decode(format!("power index value: {}", e)))?;
                self.get_validator(&address)?
                    .ok_or(StakeError::IndexInconsistent { address })
            })
            .collect()
    }

    pub(crate) fn load_active_set(&self) -> Result<Vec<ActiveEntry>, StakeError> {
        Ok(self.read(keys::ACTIVE_SET_KEY)?.unwrap_or_default())
    }

    /// Compare the current top-K against the previous cycle's snapshot and
    /// record the differences as pending updates.
    ///
    /// Validators that left are reported at power `0` first, in their
    /// previous rank order, followed by joins and power changes in the new
    /// rank order. Rank changes alone are not reported.
    pub(crate) fn refresh_active_set(&mut self) -> Result<(), StakeError> {
        let previous = self.load_active_set()?;
        let current: Vec<ActiveEntry> = self
            .get_validators_bonded_by_power()?
            .iter()
            .map(ActiveEntry::from)
            .collect();

        let previous_power: BTreeMap<Address, Power> =
            previous.iter().map(|e| (e.address, e.power)).collect();
        let current_power: BTreeMap<Address, Power> =
            current.iter().map(|e| (e.address, e.power)).collect();

        let mut pending = self.load_pending_updates()?;
        let mut changes = 0usize;

        for left in previous
            .iter()
            .filter(|e| !current_power.contains_key(&e.address))
        {
            trace!(address = %left.address, "Validator left active set");
            pending.record(left.address, left.pub_key, Power::ZERO, left.power);
            changes += 1;
        }

        for entry in &current {
            let baseline = previous_power.get(&entry.address).copied();
            if baseline == Some(entry.power) {
                continue;
            }
            trace!(
                address = %entry.address,
                power = %entry.power,
                joined = baseline.is_none(),
                "Validator power changed"
            );
            pending.record(
                entry.address,
                entry.pub_key,
                entry.power,
                baseline.unwrap_or(Power::ZERO),
            );
            changes += 1;
        }

        if changes > 0 {
            debug!(
                changes,
                active = current.len(),
                pending = pending.len(),
                "Active set changed"
            );
            bondset_metrics::record_validator_updates(changes);
            self.save_pending_updates(&pending)?;
        }
        bondset_metrics::set_active_validators(current.len());

        if previous != current {
            if current.is_empty() {
                self.store.delete(keys::ACTIVE_SET_KEY);
            } else {
                self.write(keys::ACTIVE_SET_KEY.to_vec(), &current)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BlockContext, Keeper};
    use bondset_storage_memory::MemStorage;
    use bondset_types::test_utils::test_validator;
    use bondset_types::{Address, Params, Power, Shares, Validator, ValidatorUpdate};

    fn keeper_with_max(max_validators: u16) -> Keeper<MemStorage> {
        let mut keeper = Keeper::new(MemStorage::new());
        keeper
            .set_params(&Params {
                max_validators,
                ..Params::default()
            })
            .unwrap();
        keeper
    }

    fn addresses(validators: &[Validator]) -> Vec<Address> {
        validators.iter().map(|v| v.address).collect()
    }

    fn set(keeper: &mut Keeper<MemStorage>, ctx: &BlockContext, v: &mut Validator, shares: i64) {
        v.bonded_shares = Shares::from_integer(shares);
        v.delegator_shares = Shares::from_integer(shares);
        *v = keeper.set_validator(ctx, v.clone()).unwrap();
    }

    #[test]
    fn test_rank_order_and_zero_power_exclusion() {
        let mut keeper = keeper_with_max(100);
        let mut ctx = BlockContext::default();
        let mut vals: Vec<_> = [0, 100, 1, 400, 200]
            .into_iter()
            .enumerate()
            .map(|(i, shares)| test_validator(i as u8, shares))
            .collect();
        for v in vals.iter_mut() {
            *v = keeper.set_validator(&ctx, v.clone()).unwrap();
        }

        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(
            addresses(&active),
            vec![vals[3].address, vals[4].address, vals[1].address, vals[2].address]
        );

        // a basic increase in voting power
        set(&mut keeper, &ctx, &mut vals[3], 500);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(active[0].address, vals[3].address);
        assert_eq!(active[0].power(), Power(500));

        // a decrease in voting power
        set(&mut keeper, &ctx, &mut vals[3], 300);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active[..2]), vec![vals[3].address, vals[4].address]);

        // equal voting power, the one bonded earlier wins
        ctx = BlockContext::at(10);
        set(&mut keeper, &ctx, &mut vals[3], 200);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active[..2]), vec![vals[4].address, vals[3].address]);

        // no change in voting power, no change in sort
        ctx = BlockContext::at(20);
        let rewritten = keeper.set_validator(&ctx, vals[4].clone()).unwrap();
        assert_eq!(rewritten.bond_height, vals[4].bond_height);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active[..2]), vec![vals[4].address, vals[3].address]);

        // both change in the same block: earlier call ranks first
        set(&mut keeper, &ctx, &mut vals[3], 300);
        set(&mut keeper, &ctx, &mut vals[4], 300);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active[..2]), vec![vals[3].address, vals[4].address]);
        assert_eq!(active.len(), 4);
    }

    #[test]
    fn test_edge_cases_with_two_slots() {
        let mut keeper = keeper_with_max(2);
        let mut ctx = BlockContext::default();
        let mut vals: Vec<_> = [0, 100, 400, 400, 200]
            .into_iter()
            .enumerate()
            .map(|(i, shares)| test_validator(i as u8, shares))
            .collect();
        for v in vals.iter_mut() {
            *v = keeper.set_validator(&ctx, v.clone()).unwrap();
        }

        // tied at 400: the validator set first takes precedence
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![vals[2].address, vals[3].address]);

        set(&mut keeper, &ctx, &mut vals[0], 500);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![vals[0].address, vals[2].address]);

        // a validator which leaves the set due to a decrease in power, then
        // returns to its original power, does not get its spot back on a tie
        set(&mut keeper, &ctx, &mut vals[3], 401);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![vals[0].address, vals[3].address]);

        ctx = BlockContext::at(40);
        set(&mut keeper, &ctx, &mut vals[3], 200);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![vals[0].address, vals[2].address]);

        set(&mut keeper, &ctx, &mut vals[3], 400);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![vals[0].address, vals[2].address]);
        let stored = keeper.get_validator(&vals[3].address).unwrap().unwrap();
        assert_eq!(stored.bond_height.0, 40);

        // two validators raised to the same power in the same block: the one
        // with the first call takes precedence
        set(&mut keeper, &ctx, &mut vals[0], 2000);
        set(&mut keeper, &ctx, &mut vals[1], 1000);
        set(&mut keeper, &ctx, &mut vals[2], 1000);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![vals[0].address, vals[1].address]);

        // reversing the calls reverses the outcome
        set(&mut keeper, &ctx, &mut vals[2], 1100);
        set(&mut keeper, &ctx, &mut vals[1], 1100);
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![vals[0].address, vals[2].address]);
    }

    #[test]
    fn test_max_validators_bounds_the_set() {
        let mut keeper = keeper_with_max(100);
        let ctx = BlockContext::default();
        for (i, shares) in [0, 100, 1, 300, 600].into_iter().enumerate() {
            keeper
                .set_validator(&ctx, test_validator(i as u8, shares))
                .unwrap();
        }
        assert_eq!(keeper.get_validators_bonded_by_power().unwrap().len(), 4);
        keeper.clear_tendermint_updates().unwrap();

        let mut params = keeper.get_params().unwrap();
        params.max_validators = 2;
        keeper.set_params(&params).unwrap();
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(
            active.iter().map(|v| v.power()).collect::<Vec<_>>(),
            vec![Power(600), Power(300)]
        );
        assert!(keeper.get_tendermint_updates().unwrap().is_empty());

        // The next validator write reconciles the smaller set.
        let mut top = keeper.get_validator(&active[0].address).unwrap().unwrap();
        top.description.details = "renamed".into();
        keeper.set_validator(&ctx, top).unwrap();
        assert_eq!(
            keeper.get_tendermint_updates().unwrap(),
            vec![
                ValidatorUpdate::removal(test_validator(1, 0).pub_key),
                ValidatorUpdate::removal(test_validator(2, 0).pub_key),
            ]
        );
    }

    #[test]
    fn test_fractional_shares_rank_by_floor() {
        let mut keeper = keeper_with_max(10);
        let ctx = BlockContext::default();
        let mut a = test_validator(1, 0);
        a.bonded_shares = Shares::new(21, 2);
        let a = keeper.set_validator(&ctx, a).unwrap();
        let mut b = test_validator(2, 0);
        b.bonded_shares = Shares::new(41, 4);
        let b = keeper.set_validator(&ctx, b).unwrap();

        // 10.5 and 10.25 floor to the same power; the earlier write wins.
        let active = keeper.get_validators_bonded_by_power().unwrap();
        assert_eq!(addresses(&active), vec![a.address, b.address]);
        assert!(active.iter().all(|v| v.power() == Power(10)));

        // A sub-unit validator has no power and is not active.
        let mut dust = test_validator(3, 0);
        dust.bonded_shares = Shares::new(1, 2);
        keeper.set_validator(&ctx, dust).unwrap();
        assert_eq!(keeper.get_validators_bonded_by_power().unwrap().len(), 2);
        assert_eq!(keeper.get_validators_bonded().unwrap().len(), 3);
    }
}

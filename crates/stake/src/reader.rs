//! Read contract for consumers that tally by validator power.

use crate::{Keeper, StakeError};
use bondset_storage::KvStore;
use bondset_types::{Address, Power, Validator};

/// Read-only view of the validator set.
///
/// Governance and other tallying modules hold one of these; nothing on it
/// can mutate the keeper.
pub trait ValidatorPowerReader {
    /// Look up a validator record.
    fn validator(&self, address: &Address) -> Result<Option<Validator>, StakeError>;

    /// Every validator with positive bonded shares, by address.
    fn bonded_validators(&self) -> Result<Vec<Validator>, StakeError>;

    /// The active set in rank order.
    fn bonded_validators_by_power(&self) -> Result<Vec<Validator>, StakeError>;

    /// Voting power of `address`: its power if it is in the active set, else `0`.
    fn voting_power(&self, address: &Address) -> Result<Power, StakeError> {
        Ok(self
            .bonded_validators_by_power()?
            .iter()
            .find(|v| v.address == *address)
            .map(Validator::power)
            .unwrap_or(Power::ZERO))
    }

    /// Sum of the active set's power.
    fn total_active_power(&self) -> Result<u128, StakeError> {
        Ok(self
            .bonded_validators_by_power()?
            .iter()
            .map(|v| u128::from(v.power().0))
            .sum())
    }
}

impl<S: KvStore> ValidatorPowerReader for Keeper<S> {
    fn validator(&self, address: &Address) -> Result<Option<Validator>, StakeError> {
        self.get_validator(address)
    }

    fn bonded_validators(&self) -> Result<Vec<Validator>, StakeError> {
        self.get_validators_bonded()
    }

    fn bonded_validators_by_power(&self) -> Result<Vec<Validator>, StakeError> {
        self.get_validators_bonded_by_power()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockContext;
    use bondset_storage_memory::MemStorage;
    use bondset_types::test_utils::test_validator;
    use bondset_types::Params;

    fn tally<R: ValidatorPowerReader>(reader: &R, voters: &[Address]) -> u128 {
        voters
            .iter()
            .map(|a| u128::from(reader.voting_power(a).unwrap().0))
            .sum()
    }

    #[test]
    fn test_voting_power_only_counts_active_validators() {
        let mut keeper = Keeper::new(MemStorage::new());
        keeper
            .set_params(&Params {
                max_validators: 2,
                ..Params::default()
            })
            .unwrap();
        let ctx = BlockContext::default();
        let a = keeper.set_validator(&ctx, test_validator(1, 30)).unwrap();
        let b = keeper.set_validator(&ctx, test_validator(2, 20)).unwrap();
        let c = keeper.set_validator(&ctx, test_validator(3, 10)).unwrap();

        assert_eq!(keeper.voting_power(&a.address).unwrap(), Power(30));
        assert_eq!(keeper.voting_power(&c.address).unwrap(), Power::ZERO);
        assert_eq!(keeper.voting_power(&Address::ZERO).unwrap(), Power::ZERO);
        assert_eq!(keeper.total_active_power().unwrap(), 50);
        assert_eq!(tally(&keeper, &[a.address, b.address, c.address]), 50);

        assert_eq!(keeper.bonded_validators().unwrap().len(), 3);
        assert_eq!(keeper.validator(&b.address).unwrap(), Some(b));
    }
}

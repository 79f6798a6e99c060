//! End-to-end validator set scenarios through the public API.

use bondset_stake::{BlockContext, Keeper, ValidatorPowerReader};
use bondset_storage_memory::MemStorage;
use bondset_test_helpers::TestValidators;
use bondset_types::{Address, Params, Power, Validator, ValidatorUpdate};

fn addresses(validators: &[Validator]) -> Vec<Address> {
    validators.iter().map(|v| v.address).collect()
}

#[test]
fn test_three_validators_round_trip_and_removal() {
    let mut keeper = Keeper::new(MemStorage::new());
    let ctx = BlockContext::default();
    let set = TestValidators::with_shares(&[9, 8, 7], 9);

    for v in set.validators() {
        let stored = keeper.set_validator(&ctx, v.clone()).unwrap();
        assert_eq!(keeper.get_validator(&v.address).unwrap(), Some(stored));
    }

    let by_address: Vec<_> = set
        .indices_by_address()
        .into_iter()
        .map(|i| set.address(i))
        .collect();
    assert_eq!(addresses(&keeper.get_validators_bonded().unwrap()), by_address);
    assert_eq!(
        addresses(&keeper.get_validators_bonded_by_power().unwrap()),
        vec![set.address(0), set.address(1), set.address(2)]
    );

    keeper.clear_tendermint_updates().unwrap();
    keeper.remove_validator(&ctx, &set.address(1)).unwrap();
    assert!(keeper.get_validator(&set.address(1)).unwrap().is_none());
    let remaining: Vec<_> = by_address
        .into_iter()
        .filter(|a| *a != set.address(1))
        .collect();
    assert_eq!(addresses(&keeper.get_validators_bonded().unwrap()), remaining);
    assert_eq!(
        keeper.get_tendermint_updates().unwrap(),
        vec![ValidatorUpdate::removal(set.pub_key(1))]
    );
}

#[test]
fn test_two_slot_tie_breaks() {
    let mut keeper = Keeper::new(MemStorage::new());
    keeper
        .set_params(&Params {
            max_validators: 2,
            ..Params::default()
        })
        .unwrap();
    let mut ctx = BlockContext::default();
    let set = TestValidators::with_shares(&[0, 100, 400, 400, 200], 10);
    for v in set.validators() {
        keeper.set_validator(&ctx, v.clone()).unwrap();
    }

    // C and D tie; C was set first.
    let active = keeper.get_validators_bonded_by_power().unwrap();
    assert_eq!(addresses(&active), vec![set.address(2), set.address(3)]);

    // D rises above the tie.
    ctx = BlockContext::at(5);
    keeper.set_validator(&ctx, set.with_power(3, 401)).unwrap();
    let active = keeper.get_validators_bonded_by_power().unwrap();
    assert_eq!(addresses(&active), vec![set.address(3), set.address(2)]);

    // C drops out, then returns to 400: D kept 401 so nothing to reclaim.
    keeper.set_validator(&ctx, set.with_power(2, 150)).unwrap();
    let active = keeper.get_validators_bonded_by_power().unwrap();
    assert_eq!(addresses(&active), vec![set.address(3), set.address(4)]);

    // E raised to 400 before C returns to 400: E keeps the slot.
    ctx = BlockContext::at(6);
    keeper.set_validator(&ctx, set.with_power(4, 400)).unwrap();
    keeper.set_validator(&ctx, set.with_power(2, 400)).unwrap();
    let active = keeper.get_validators_bonded_by_power().unwrap();
    assert_eq!(addresses(&active), vec![set.address(3), set.address(4)]);

    // The governance view agrees.
    assert_eq!(keeper.voting_power(&set.address(2)).unwrap(), Power::ZERO);
    assert_eq!(keeper.total_active_power().unwrap(), 801);
}

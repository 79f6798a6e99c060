//! Block atomicity through a write-buffer overlay.

use bondset_stake::{BlockContext, Keeper};
use bondset_storage::{CacheStore, KvStore};
use bondset_storage_memory::MemStorage;
use bondset_test_helpers::TestValidators;
use bondset_types::{Delegation, Shares};

fn apply_block(keeper: &mut Keeper<impl KvStore>, set: &TestValidators) {
    let ctx = BlockContext::at(1);
    for v in set.validators() {
        keeper.set_validator(&ctx, v.clone()).unwrap();
    }
    keeper.remove_validator(&ctx, &set.address(0)).unwrap();
    keeper
        .set_delegation(&Delegation::new(
            set.address(0),
            set.address(1),
            Shares::from_integer(3),
            ctx.height,
        ))
        .unwrap();
}

#[test]
fn test_discarded_block_leaves_no_trace() {
    let set = TestValidators::with_shares(&[5, 10, 15], 1);
    let mut base = MemStorage::new();
    let before = base.state_hash();

    let mut cache = CacheStore::new(&mut base);
    {
        let mut keeper = Keeper::new(&mut cache);
        apply_block(&mut keeper, &set);
        // The block sees its own writes.
        assert_eq!(keeper.get_validators_bonded().unwrap().len(), 2);
        assert_eq!(keeper.get_tendermint_updates().unwrap().len(), 2);
    }
    assert!(cache.pending_writes() > 0);
    cache.discard();

    assert_eq!(base.state_hash(), before);
    assert!(base.is_empty());
}

#[test]
fn test_committed_block_matches_direct_application() {
    let set = TestValidators::with_shares(&[5, 10, 15], 2);

    let mut direct = MemStorage::new();
    apply_block(&mut Keeper::new(&mut direct), &set);

    let mut base = MemStorage::new();
    let mut cache = CacheStore::new(&mut base);
    apply_block(&mut Keeper::new(&mut cache), &set);

    // Nothing reaches the base before commit.
    assert!(cache.parent().is_empty());
    cache.commit();

    assert_eq!(base.state_hash(), direct.state_hash());
    let keeper = Keeper::new(base);
    assert!(keeper.get_validator(&set.address(0)).unwrap().is_none());
    assert_eq!(keeper.get_bonds(10).unwrap().len(), 1);
}

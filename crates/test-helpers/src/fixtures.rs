//! Scripted keeper workloads.
//!
//! A script is a deterministic sequence of keeper calls derived from a seed.
//! Feeding the same script to independent replicas must leave them with
//! identical stores.

use crate::TestValidators;
use bondset_types::{Address, BlockHeight, Delegation, Shares};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One keeper call in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `set_validator` for the validator at the index with these shares.
    SetValidator {
        /// Validator index in the [`TestValidators`] set.
        index: usize,
        /// New bonded shares.
        shares: i64,
    },
    /// `remove_validator` for the validator at the index.
    RemoveValidator {
        /// Validator index.
        index: usize,
    },
    /// `set_delegation`.
    Delegate(Delegation),
    /// Deliver and clear pending updates.
    ClearUpdates,
    /// Advance the block height by one.
    NextBlock,
}

/// Build a script of `steps` calls over `validators`.
///
/// Share amounts are drawn from a small range so that equal-power ties are
/// frequent.
pub fn script(validators: &TestValidators, steps: usize, seed: u64) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut height = 0u64;
    let size = validators.size();
    (0..steps)
        .map(|_| {
            let roll = rng.gen_range(0..100u32);
            let index = rng.gen_range(0..size);
            match roll {
                0..=59 => Op::SetValidator {
                    index,
                    shares: rng.gen_range(0..8i64) * 25,
                },
                60..=69 => Op::RemoveValidator { index },
                70..=84 => {
                    let delegator = Address::new([rng.gen_range(1..=4u8); 20]);
                    Op::Delegate(Delegation::new(
                        delegator,
                        validators.address(index),
                        Shares::new(rng.gen_range(1..=50i64), 3),
                        BlockHeight(height),
                    ))
                }
                85..=92 => Op::ClearUpdates,
                _ => {
                    height += 1;
                    Op::NextBlock
                }
            }
        })
        .collect()
}

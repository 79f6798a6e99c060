//! The keeper and its execution context.

use crate::codec::{decode, encode};
use crate::StakeError;
use bondset_storage::KvStore;
use bondset_types::BlockHeight;
use sbor::prelude::{BasicDecode, BasicEncode};

/// Per-block context threaded through every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockContext {
    /// Height of the block being processed.
    pub height: BlockHeight,
}

impl BlockContext {
    /// Context for the block at `height`.
    pub fn at(height: u64) -> Self {
        Self {
            height: BlockHeight(height),
        }
    }
}

/// Validator-set bookkeeping over an ordered key-value store.
///
/// The keeper holds no state of its own: every record, the power index,
/// the active-set snapshot, the pending update set and the update sequence
/// counter live in `S`. Two keepers over stores with identical contents
/// behave identically.
///
/// For block atomicity, run the keeper over a
/// [`CacheStore`](bondset_storage::CacheStore) and commit or discard it
/// once the block is decided.
pub struct Keeper<S: KvStore> {
    pub(crate) store: S,
}

impl<S: KvStore> Keeper<S> {
    /// Create a keeper over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the keeper, returning the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    pub(crate) fn read<T: BasicDecode>(&self, key: &[u8]) -> Result<Option<T>, StakeError> {
        self.store.get(key).map(|bytes| decode(&bytes)).transpose()
    }

    pub(crate) fn write<T: BasicEncode>(&mut self, key: Vec<u8>, value: &T) -> Result<(), StakeError> {
        let bytes = encode(value)?;
        self.store.set(key, bytes);
        Ok(())
    }

    /// Take the next update sequence number, advancing the persisted counter.
    pub(crate) fn next_update_seq(&mut self) -> Result<u64, StakeError> {
        let seq: u64 = self.read(crate::keys::UPDATE_SEQ_KEY)?.unwrap_or(0);
        self.write(crate::keys::UPDATE_SEQ_KEY.to_vec(), &(seq + 1))?;
        Ok(seq)
    }
}

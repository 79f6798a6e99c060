//! # Memory Storage
//!
//! Ordered in-memory store backed by `im::OrdMap`.

use bondset_storage::{KvIter, KvStore};
use im::OrdMap;
use std::ops::Bound;
use tracing::trace;

/// In-memory ordered key-value store.
///
/// Cloning is O(1): the clone shares structure with the original and the two
/// diverge copy-on-write. [`snapshot`](Self::snapshot) is the named form of
/// that clone.
#[derive(Debug, Clone, Default)]
pub struct MemStorage {
    data: OrdMap<Vec<u8>, Vec<u8>>,
}

impl MemStorage {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time copy sharing structure with `self`.
    pub fn snapshot(&self) -> MemStorage {
        self.clone()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Digest over every entry in key order.
    ///
    /// Two stores with the same contents have the same digest. Used to check
    /// that replicas applying the same mutations agree byte for byte.
    pub fn state_hash(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        for (key, value) in self.data.iter() {
            hasher.update(&(key.len() as u64).to_be_bytes());
            hasher.update(key);
            hasher.update(&(value.len() as u64).to_be_bytes());
            hasher.update(value);
        }
        *hasher.finalize().as_bytes()
    }
}

impl KvStore for MemStorage {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        trace!(key_len = key.len(), value_len = value.len(), "set");
        self.data.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        trace!(key_len = key.len(), "delete");
        self.data.remove(key);
    }

    /// Uses `OrdMap::range()` for O(log n + k) lookup.
    fn range(&self, start: &[u8], end: Option<&[u8]>) -> KvIter<'_> {
        let upper = match end {
            Some(end) if end <= start => return Box::new(std::iter::empty()),
            Some(end) => Bound::Excluded(end.to_vec()),
            None => Bound::Unbounded,
        };
        Box::new(
            self.data
                .range((Bound::Included(start.to_vec()), upper))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}

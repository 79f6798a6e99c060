//! Write-buffer overlay for atomic multi-key mutations.
//!
//! Provides [`CacheStore`], which captures writes without modifying the
//! parent store until committed.

use crate::store::{KvIter, KvStore};
use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::ops::Bound;
use tracing::trace;

/// A store that buffers writes over a parent store.
///
/// Reads check the buffer first, then fall through to the parent. Range
/// scans merge both views, with buffered writes shadowing parent entries and
/// buffered deletes hiding them.
///
/// Writes reach the parent only through [`commit`](Self::commit), applied in
/// ascending key order. Dropping the cache discards them.
///
/// # Type Parameter
/// `S` is the parent store. Pass `&mut S` to layer over a store you keep
/// ownership of; the blanket impl on `&mut S` makes that a [`KvStore`] too.
pub struct CacheStore<S: KvStore> {
    /// The underlying store.
    parent: S,

    /// Buffered writes. `None` marks a delete.
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<S: KvStore> CacheStore<S> {
    /// Layer an empty write buffer over `parent`.
    pub fn new(parent: S) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
        }
    }

    /// Number of buffered writes (sets and deletes).
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Read-only access to the parent store.
    pub fn parent(&self) -> &S {
        &self.parent
    }

    /// Apply every buffered write to the parent and return it.
    pub fn commit(mut self) -> S {
        let writes = std::mem::take(&mut self.writes);
        bondset_metrics::record_storage_batch_size(writes.len());
        trace!(writes = writes.len(), "Committing cache store");
        for (key, value) in writes {
            match value {
                Some(value) => self.parent.set(key, value),
                None => self.parent.delete(&key),
            }
        }
        self.parent
    }

    /// Drop every buffered write and return the untouched parent.
    pub fn discard(self) -> S {
        trace!(writes = self.writes.len(), "Discarding cache store");
        self.parent
    }
}

impl<S: KvStore> KvStore for CacheStore<S> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.writes.get(key) {
            Some(buffered) => buffered.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.writes.insert(key.to_vec(), None);
    }

    fn range(&self, start: &[u8], end: Option<&[u8]>) -> KvIter<'_> {
        let upper = match end {
            Some(end) if end <= start => return Box::new(std::iter::empty()),
            Some(end) => Bound::Excluded(end),
            None => Bound::Unbounded,
        };
        let buffered = self
            .writes
            .range::<[u8], _>((Bound::Included(start), upper));
        Box::new(MergeIter {
            parent: self.parent.range(start, end).peekable(),
            buffered: buffered.peekable(),
        })
    }
}

/// Ordered merge of a parent scan and the buffered writes in the same range.
struct MergeIter<'a> {
    parent: Peekable<KvIter<'a>>,
    buffered: Peekable<btree_map::Range<'a, Vec<u8>, Option<Vec<u8>>>>,
}

impl Iterator for MergeIter<'_> {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let order = match (self.parent.peek(), self.buffered.peek()) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((parent_key, _)), Some((buffered_key, _))) => {
                    parent_key.as_slice().cmp(buffered_key.as_slice())
                }
            };

            match order {
                Ordering::Less => return self.parent.next(),
                // The buffered write shadows the parent entry.
                Ordering::Equal => {
                    self.parent.next();
                }
                Ordering::Greater => {}
            }

            if let Some((key, Some(value))) = self.buffered.next() {
                return Some((key.clone(), value.clone()));
            }
            // Buffered delete: skip it and keep merging.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> BTreeMap<Vec<u8>, Vec<u8>> {
        let mut map = BTreeMap::new();
        for (k, v) in [(b"a", b"1"), (b"b", b"2"), (b"c", b"3")] {
            map.insert(k.to_vec(), v.to_vec());
        }
        map
    }

    fn scan<S: KvStore>(store: &S) -> Vec<(Vec<u8>, Vec<u8>)> {
        store.range(b"", None).collect()
    }

    #[test]
    fn test_reads_see_buffered_writes() {
        let mut base = parent();
        let mut cache = CacheStore::new(&mut base);
        cache.set(b"b".to_vec(), b"20".to_vec());
        cache.delete(b"c");

        assert_eq!(cache.get(b"b"), Some(b"20".to_vec()));
        assert_eq!(cache.get(b"c"), None);
        assert_eq!(cache.get(b"a"), Some(b"1".to_vec()));
        assert_eq!(cache.parent().get(b"b"), Some(b"2".to_vec()));
    }

    #[test]
    fn test_range_merges_in_order() {
        let mut base = parent();
        let mut cache = CacheStore::new(&mut base);
        cache.set(b"ab".to_vec(), b"new".to_vec());
        cache.set(b"b".to_vec(), b"20".to_vec());
        cache.delete(b"a");
        cache.set(b"d".to_vec(), b"4".to_vec());

        let merged = scan(&cache);
        assert_eq!(
            merged,
            vec![
                (b"ab".to_vec(), b"new".to_vec()),
                (b"b".to_vec(), b"20".to_vec()),
                (b"c".to_vec(), b"3".to_vec()),
                (b"d".to_vec(), b"4".to_vec()),
            ]
        );
    }

    #[test]
    fn test_range_respects_bounds() {
        let mut base = parent();
        let mut cache = CacheStore::new(&mut base);
        cache.set(b"bb".to_vec(), b"x".to_vec());
        cache.set(b"c".to_vec(), b"y".to_vec());

        let keys: Vec<_> = cache
            .range(b"b", Some(&b"c"[..]))
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"b".to_vec(), b"bb".to_vec()]);
    }

    #[test]
    fn test_commit_applies_writes() {
        let mut base = parent();
        let mut cache = CacheStore::new(&mut base);
        cache.set(b"d".to_vec(), b"4".to_vec());
        cache.delete(b"a");
        assert_eq!(cache.pending_writes(), 2);
        cache.commit();

        assert_eq!(KvStore::get(&base, b"d"), Some(b"4".to_vec()));
        assert_eq!(KvStore::get(&base, b"a"), None);
    }

    #[test]
    fn test_discard_leaves_parent_untouched() {
        let mut base = parent();
        let before = base.clone();
        let mut cache = CacheStore::new(&mut base);
        cache.set(b"d".to_vec(), b"4".to_vec());
        cache.delete(b"a");
        cache.discard();

        assert_eq!(base, before);
    }
}

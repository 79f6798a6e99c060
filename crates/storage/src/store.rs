//! The ordered key-value store trait.

use std::collections::BTreeMap;
use std::ops::Bound;

/// Boxed iterator over `(key, value)` pairs in ascending key order.
pub type KvIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// An ordered byte-key store.
///
/// Implementations must be deterministic: the same sequence of writes
/// produces the same contents and the same scan order on every replica.
pub trait KvStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Whether a value is stored under `key`.
    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Remove `key`. Removing an absent key is a no-op.
    fn delete(&mut self, key: &[u8]);

    /// Scan keys in `[start, end)` in ascending order.
    ///
    /// `end = None` scans to the end of the keyspace.
    fn range(&self, start: &[u8], end: Option<&[u8]>) -> KvIter<'_>;

    /// Scan every key beginning with `prefix` in ascending order.
    fn prefix_iter(&self, prefix: &[u8]) -> KvIter<'_> {
        let end = crate::keys::next_prefix(prefix);
        self.range(prefix, end.as_deref())
    }
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn has(&self, key: &[u8]) -> bool {
        (**self).has(key)
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) {
        (**self).delete(key)
    }

    fn range(&self, start: &[u8], end: Option<&[u8]>) -> KvIter<'_> {
        (**self).range(start, end)
    }
}

/// Plain ordered map as a store. Useful for hosts that already buffer
/// their state in a `BTreeMap` and for tests.
impl KvStore for BTreeMap<Vec<u8>, Vec<u8>> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        BTreeMap::get(self, key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.remove(key);
    }

    fn range(&self, start: &[u8], end: Option<&[u8]>) -> KvIter<'_> {
        let upper = match end {
            Some(end) if end <= start => return Box::new(std::iter::empty()),
            Some(end) => Bound::Excluded(end),
            None => Bound::Unbounded,
        };
        Box::new(
            BTreeMap::range::<[u8], _>(self, (Bound::Included(start), upper))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}

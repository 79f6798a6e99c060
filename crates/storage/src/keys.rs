//! Helper functions for building and scanning storage keys.

/// Compute the exclusive end key for a prefix scan.
///
/// Returns `None` if the prefix is all `0xFF` bytes (no valid exclusive
/// upper bound); such a scan runs to the end of the keyspace.
pub fn next_prefix(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut next = prefix.to_vec();
    while let Some(last) = next.last_mut() {
        if *last < u8::MAX {
            *last += 1;
            return Some(next);
        }
        next.pop();
    }
    None
}

/// Concatenate key segments into one storage key.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let len = parts.iter().map(|p| p.len()).sum();
    let mut key = Vec::with_capacity(len);
    for part in parts {
        key.extend_from_slice(part);
    }
    key
}

/// The key immediately after `key` in lexicographic order.
///
/// Used to resume a scan strictly after the last key returned.
pub fn successor(key: &[u8]) -> Vec<u8> {
    let mut next = Vec::with_capacity(key.len() + 1);
    next.extend_from_slice(key);
    next.push(0);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_prefix_increments_last_byte() {
        assert_eq!(next_prefix(&[0x01, 0x02]), Some(vec![0x01, 0x03]));
    }

    #[test]
    fn test_next_prefix_truncates_trailing_ff() {
        // [1, 255] must not produce [2, 0]: the key [2] sorts before it but
        // does not start with the prefix.
        assert_eq!(next_prefix(&[0x01, 0xFF]), Some(vec![0x02]));
        assert_eq!(next_prefix(&[0x01, 0xFF, 0xFF]), Some(vec![0x02]));
    }

    #[test]
    fn test_next_prefix_all_ff() {
        assert_eq!(next_prefix(&[0xFF, 0xFF]), None);
        assert_eq!(next_prefix(&[]), None);
    }

    #[test]
    fn test_concat_and_successor() {
        assert_eq!(concat(&[b"ab", b"", b"c"]), b"abc".to_vec());
        let key = b"abc".to_vec();
        let next = successor(&key);
        assert!(next > key);
        assert!(next < b"abd".to_vec());
    }
}

//! Test helpers for bondset - deterministic validator fixtures.
//!
//! # Example
//!
//! ```rust
//! use bondset_test_helpers::TestValidators;
//!
//! // Five validators with fixed keys and the given bonded shares
//! let set = TestValidators::with_shares(&[0, 100, 400, 400, 200], 42);
//! assert_eq!(set.size(), 5);
//! assert_eq!(set.validator(2).power().0, 400);
//! ```

pub mod fixtures;

use bondset_types::{Address, Description, PubKey, Shares, Validator};

/// A set of validators with deterministic consensus keys.
///
/// Index `i` always maps to the same key for the same seed, so tests can
/// refer to validators by position and replicas can be built independently.
#[derive(Debug, Clone)]
pub struct TestValidators {
    validators: Vec<Validator>,
}

impl TestValidators {
    /// Create `size` unbonded validators from `seed`.
    pub fn new(size: usize, seed: u64) -> Self {
        let validators = (0..size)
            .map(|i| {
                Validator::new(
                    Self::derive_pub_key(seed, i),
                    Description::with_moniker(format!("validator-{i}")),
                )
            })
            .collect();
        Self { validators }
    }

    /// Create one validator per entry of `shares`, bonded with that amount.
    pub fn with_shares(shares: &[i64], seed: u64) -> Self {
        let mut set = Self::new(shares.len(), seed);
        for (v, amount) in set.validators.iter_mut().zip(shares) {
            *v = v.clone().with_shares(Shares::from_integer(*amount));
        }
        set
    }

    fn derive_pub_key(seed: u64, index: usize) -> PubKey {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"bondset-test-validator");
        hasher.update(&seed.to_le_bytes());
        hasher.update(&(index as u64).to_le_bytes());
        PubKey::new(*hasher.finalize().as_bytes())
    }

    /// Number of validators.
    pub fn size(&self) -> usize {
        self.validators.len()
    }

    /// Validator at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= size()`.
    pub fn validator(&self, idx: usize) -> &Validator {
        &self.validators[idx]
    }

    /// Copy of the validator at `idx` with both share fields set to `shares`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= size()`.
    pub fn with_power(&self, idx: usize, shares: i64) -> Validator {
        self.validators[idx]
            .clone()
            .with_shares(Shares::from_integer(shares))
    }

    /// Address of the validator at `idx`.
    pub fn address(&self, idx: usize) -> Address {
        self.validators[idx].address
    }

    /// Consensus key of the validator at `idx`.
    pub fn pub_key(&self, idx: usize) -> PubKey {
        self.validators[idx].pub_key
    }

    /// Index of the validator owning `pub_key`, if any.
    pub fn index_of(&self, pub_key: &PubKey) -> Option<usize> {
        self.validators.iter().position(|v| v.pub_key == *pub_key)
    }

    /// All validators.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Indices ordered by validator address, the order of address scans.
    pub fn indices_by_address(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.size()).collect();
        indices.sort_by_key(|&i| self.validators[i].address);
        indices
    }
}

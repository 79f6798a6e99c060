//! Account and validator identity types.

use sbor::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address.
///
/// Validator addresses are derived from the consensus public key (see
/// [`Address::from_pub_key`]); delegator addresses are opaque. Addresses order
/// lexicographically by their bytes, which is the enumeration order used by
/// every address-keyed scan in the store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, BasicSbor)]
#[sbor(transparent)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of an address in bytes.
    pub const BYTES: usize = 20;

    /// Zero address (all bytes are 0x00).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive the address owned by a consensus public key.
    ///
    /// The address is the first 20 bytes of the Blake3 hash of the key bytes.
    pub fn from_pub_key(pub_key: &PubKey) -> Self {
        let hash = blake3::hash(pub_key.as_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash.as_bytes()[..20]);
        Self(bytes)
    }

    /// Create an address from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HexError> {
        let arr: [u8; 20] = bytes.try_into().map_err(|_| HexError::InvalidLength {
            expected: Self::BYTES * 2,
            actual: bytes.len() * 2,
        })?;
        Ok(Self(arr))
    }

    /// Parse an address from a 40-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, HexError> {
        Ok(Self(decode_fixed::<20>(hex)?))
    }

    /// Convert address to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get bytes as slice reference.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Address({}..{})", &hex[..8], &hex[32..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// A 32-byte consensus public key (Ed25519 width).
///
/// This is the identity the consensus engine knows a validator by; power
/// updates are reported against these bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, BasicSbor)]
#[sbor(transparent)]
pub struct PubKey([u8; 32]);

impl PubKey {
    /// Size of a public key in bytes.
    pub const BYTES: usize = 32;

    /// Wrap raw key bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, HexError> {
        Ok(Self(decode_fixed::<32>(hex)?))
    }

    /// Convert key to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get bytes as slice reference.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The address owned by this key.
    pub fn address(&self) -> Address {
        Address::from_pub_key(self)
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "PubKey({}..{})", &hex[..8], &hex[56..])
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for PubKey {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

fn decode_fixed<const N: usize>(hex: &str) -> Result<[u8; N], HexError> {
    if hex.len() != N * 2 {
        return Err(HexError::InvalidLength {
            expected: N * 2,
            actual: hex.len(),
        });
    }
    let mut bytes = [0u8; N];
    hex::decode_to_slice(hex, &mut bytes).map_err(|_| HexError::InvalidHex)?;
    Ok(bytes)
}

// Addresses and keys appear as hex strings in genesis files.
macro_rules! hex_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                <$ty>::from_hex(&s).map_err(de::Error::custom)
            }
        }
    };
}

hex_serde!(Address);
hex_serde!(PubKey);

/// Errors that can occur when parsing hex strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// Invalid hex string length.
    #[error("Invalid hex length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Invalid hex characters.
    #[error("Invalid hex string")]
    InvalidHex,
}

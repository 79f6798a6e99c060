//! Exact rational stake arithmetic.
//!
//! Stake weights must compare and order identically on every replica, so they
//! are kept as reduced arbitrary-precision fractions rather than floats or
//! fixed-point values that round.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use sbor::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// An exact, always-reduced rational number of shares.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shares(BigRational);

impl Shares {
    /// Zero shares.
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Whole number of shares.
    pub fn from_integer(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    /// The fraction `numer / denom`, reduced.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn new(numer: i64, denom: i64) -> Self {
        Self(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Check if this is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if this is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Check if this is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Largest integer not greater than this value.
    pub fn floor(&self) -> BigInt {
        self.0.floor().to_integer()
    }

    /// Voting power for these shares: the floor, as an integer.
    ///
    /// Returns `None` for negative shares and for values that do not fit in
    /// a `u64`.
    pub fn to_power(&self) -> Option<Power> {
        if self.is_negative() {
            return None;
        }
        self.floor().to_u64().map(Power)
    }
}

impl Default for Shares {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Shares {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl Add for &Shares {
    type Output = Shares;

    fn add(self, rhs: &Shares) -> Shares {
        Shares(&self.0 + &rhs.0)
    }
}

impl Sub for &Shares {
    type Output = Shares;

    fn sub(self, rhs: &Shares) -> Shares {
        Shares(&self.0 - &rhs.0)
    }
}

impl Mul for &Shares {
    type Output = Shares;

    fn mul(self, rhs: &Shares) -> Shares {
        Shares(&self.0 * &rhs.0)
    }
}

impl fmt::Debug for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shares({})", self)
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

/// Errors that can occur when parsing a share amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SharesParseError {
    /// Numerator or denominator is not an integer.
    #[error("Invalid share amount: {0}")]
    InvalidNumber(String),

    /// Denominator is zero.
    #[error("Share amount has a zero denominator")]
    ZeroDenominator,
}

impl FromStr for Shares {
    type Err = SharesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<BigInt>()
                .map_err(|_| SharesParseError::InvalidNumber(s.to_string()))
        };
        match s.split_once('/') {
            None => Ok(Self(BigRational::from_integer(parse(s)?))),
            Some((numer, denom)) => {
                let denom = parse(denom)?;
                if denom.is_zero() {
                    return Err(SharesParseError::ZeroDenominator);
                }
                Ok(Self(BigRational::new(parse(numer)?, denom)))
            }
        }
    }
}

impl Serialize for Shares {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Shares {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// Manual SBOR implementation (BigRational has no SBOR derive)
// Encoded as a tuple of the signed big-endian numerator and denominator bytes.
// The fraction is always reduced, so equal values encode identically.
// ============================================================================

impl<E: sbor::Encoder<sbor::NoCustomValueKind>> sbor::Encode<sbor::NoCustomValueKind, E>
    for Shares
{
    fn encode_value_kind(&self, encoder: &mut E) -> Result<(), sbor::EncodeError> {
        encoder.write_value_kind(sbor::ValueKind::Tuple)
    }

    fn encode_body(&self, encoder: &mut E) -> Result<(), sbor::EncodeError> {
        encoder.write_size(2)?;
        encoder.encode(&self.0.numer().to_signed_bytes_be())?;
        encoder.encode(&self.0.denom().to_signed_bytes_be())?;
        Ok(())
    }
}

impl<D: sbor::Decoder<sbor::NoCustomValueKind>> sbor::Decode<sbor::NoCustomValueKind, D>
    for Shares
{
    fn decode_body_with_value_kind(
        decoder: &mut D,
        value_kind: sbor::ValueKind<sbor::NoCustomValueKind>,
    ) -> Result<Self, sbor::DecodeError> {
        decoder.check_preloaded_value_kind(value_kind, sbor::ValueKind::Tuple)?;
        let length = decoder.read_size()?;

        if length != 2 {
            return Err(sbor::DecodeError::UnexpectedSize {
                expected: 2,
                actual: length,
            });
        }

        let numer: Vec<u8> = decoder.decode()?;
        let denom: Vec<u8> = decoder.decode()?;
        let denom = BigInt::from_signed_bytes_be(&denom);
        if denom.is_zero() {
            return Err(sbor::DecodeError::InvalidCustomValue);
        }

        Ok(Self(BigRational::new(
            BigInt::from_signed_bytes_be(&numer),
            denom,
        )))
    }
}

impl sbor::Categorize<sbor::NoCustomValueKind> for Shares {
    fn value_kind() -> sbor::ValueKind<sbor::NoCustomValueKind> {
        sbor::ValueKind::Tuple
    }
}

impl sbor::Describe<sbor::NoCustomTypeKind> for Shares {
    const TYPE_ID: sbor::RustTypeId = sbor::RustTypeId::novel_with_code("Shares", &[], &[]);

    fn type_data() -> sbor::TypeData<sbor::NoCustomTypeKind, sbor::RustTypeId> {
        sbor::TypeData::unnamed(sbor::TypeKind::Any)
    }
}

/// Consensus voting power derived from bonded shares.
///
/// Power `0` means the validator is not (or no longer) part of the active set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, BasicSbor, Serialize,
    Deserialize,
)]
#[sbor(transparent)]
#[serde(transparent)]
pub struct Power(pub u64);

impl Power {
    /// No power.
    pub const ZERO: Self = Self(0);

    /// Check if this is zero power.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

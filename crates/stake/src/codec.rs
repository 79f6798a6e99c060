//! SBOR encoding helpers for persisted records.

use crate::StakeError;
use sbor::prelude::{BasicDecode, BasicEncode};

/// Encode a record for storage.
pub fn encode<T: BasicEncode>(value: &T) -> Result<Vec<u8>, StakeError> {
    sbor::basic_encode(value).map_err(|e| StakeError::Encode(format!("{:?}", e)))
}

/// Decode a stored record.
pub fn decode<T: BasicDecode>(bytes: &[u8]) -> Result<T, StakeError> {
    sbor::basic_decode(bytes).map_err(|e| StakeError::Decode(format!("{:?}", e)))
}

//! Small identifier newtypes.

use sbor::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block height in the chain (genesis = 0).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, BasicSbor, Serialize,
    Deserialize,
)]
#[sbor(transparent)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// Genesis height.
    pub const GENESIS: Self = Self(0);
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

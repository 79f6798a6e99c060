//! Stake parameters and the global stake-accounting pool.

use crate::Shares;
use sbor::prelude::*;
use serde::{Deserialize, Serialize};

/// Default bound on the active validator set.
pub const DEFAULT_MAX_VALIDATORS: u16 = 100;

/// Default staking denomination.
pub const DEFAULT_BOND_DENOM: &str = "steak";

/// Tunable stake parameters.
///
/// Only `max_validators` is interpreted by the keeper; the remaining fields
/// are carried for the inflation and reward logic that lives elsewhere.
/// Missing fields in a genesis file take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Maximum annual change in the inflation rate.
    pub inflation_rate_change: Shares,
    /// Inflation ceiling.
    pub inflation_max: Shares,
    /// Inflation floor.
    pub inflation_min: Shares,
    /// Target fraction of supply that is bonded.
    pub goal_bonded: Shares,
    /// Maximum number of validators in the active set.
    pub max_validators: u16,
    /// Denomination of bondable coins.
    pub bond_denom: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            inflation_rate_change: Shares::new(13, 100),
            inflation_max: Shares::new(20, 100),
            inflation_min: Shares::new(7, 100),
            goal_bonded: Shares::new(67, 100),
            max_validators: DEFAULT_MAX_VALIDATORS,
            bond_denom: DEFAULT_BOND_DENOM.to_string(),
        }
    }
}

/// Global stake-accounting totals.
///
/// The keeper persists and returns this record verbatim; the exchange-rate
/// formulas that update it belong to the callers.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
    /// Total supply of the staking token.
    pub total_supply: i64,
    /// Tokens held by bonded validators.
    pub bonded_pool: i64,
    /// Tokens held by unbonded validators.
    pub unbonded_pool: i64,
    /// Shares issued against the bonded pool.
    pub bonded_shares: Shares,
    /// Shares issued against the unbonded pool.
    pub unbonded_shares: Shares,
    /// Unix time of the last inflation provision.
    pub inflation_last_time: i64,
    /// Current annual inflation rate.
    pub inflation: Shares,
    /// Unix time of the last commission reset.
    pub date_last_commission_reset: i64,
    /// Bonded shares at the last provision, for fee distribution.
    pub prev_bonded_shares: Shares,
}

impl Pool {
    /// The pool of a chain before any stake has moved.
    pub fn initial() -> Self {
        Self {
            total_supply: 0,
            bonded_pool: 0,
            unbonded_pool: 0,
            bonded_shares: Shares::zero(),
            unbonded_shares: Shares::zero(),
            inflation_last_time: 0,
            inflation: Shares::new(7, 100),
            date_last_commission_reset: 0,
            prev_bonded_shares: Shares::zero(),
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = Params::default();
        assert_eq!(params.max_validators, 100);
        assert_eq!(params.goal_bonded, Shares::new(67, 100));
        assert_eq!(params.bond_denom, "steak");
    }

    #[test]
    fn test_params_partial_json_takes_defaults() {
        let params: Params = serde_json::from_str(r#"{"max_validators": 4}"#).unwrap();
        assert_eq!(params.max_validators, 4);
        assert_eq!(params.inflation_max, Shares::new(1, 5));
    }

    #[test]
    fn test_initial_pool() {
        let pool = Pool::initial();
        assert_eq!(pool.total_supply, 0);
        assert_eq!(pool.inflation, Shares::new(7, 100));
        assert_eq!(pool, Pool::default());
    }
}

//! Genesis import and export.

use crate::{BlockContext, Keeper, StakeError};
use bondset_storage::KvStore;
use bondset_types::{Delegation, Params, Pool, Validator, ValidatorUpdate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Complete keeper state as carried in a genesis file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisState {
    /// Stake parameters.
    pub params: Params,
    /// Accounting pool.
    pub pool: Pool,
    /// Validators, applied in list order.
    pub validators: Vec<Validator>,
    /// Delegations.
    pub bonds: Vec<Delegation>,
}

impl GenesisState {
    /// Check the state for problems that would make import fail or diverge.
    pub fn validate(&self) -> Result<(), StakeError> {
        if self.params.max_validators == 0 {
            return Err(StakeError::InvalidGenesis(
                "max_validators must be positive".into(),
            ));
        }

        let mut addresses = BTreeSet::new();
        for v in &self.validators {
            if !addresses.insert(v.address) {
                return Err(StakeError::InvalidGenesis(format!(
                    "duplicate validator {}",
                    v.address
                )));
            }
            if v.pub_key.address() != v.address {
                return Err(StakeError::InvalidGenesis(format!(
                    "validator {} does not match its public key",
                    v.address
                )));
            }
            if v.bonded_shares.is_negative() || v.delegator_shares.is_negative() {
                return Err(StakeError::InvalidGenesis(format!(
                    "validator {} has negative shares",
                    v.address
                )));
            }
            if v.bonded_shares.to_power().is_none() {
                return Err(StakeError::InvalidGenesis(format!(
                    "validator {} power overflows",
                    v.address
                )));
            }
        }

        let mut pairs = BTreeSet::new();
        for d in &self.bonds {
            if !pairs.insert((d.delegator_addr, d.validator_addr)) {
                return Err(StakeError::InvalidGenesis(format!(
                    "duplicate delegation {} -> {}",
                    d.delegator_addr, d.validator_addr
                )));
            }
            if d.shares.is_negative() {
                return Err(StakeError::InvalidGenesis(format!(
                    "delegation {} -> {} has negative shares",
                    d.delegator_addr, d.validator_addr
                )));
            }
        }
        Ok(())
    }
}

impl<S: KvStore> Keeper<S> {
    /// Load a genesis state into an empty keeper.
    ///
    /// Validators are set in list order, so equal-power ties rank by their
    /// position in the file. Returns the initial active set as pending
    /// updates; they are left pending for the caller to deliver and clear.
    pub fn init_genesis(
        &mut self,
        ctx: &BlockContext,
        state: &GenesisState,
    ) -> Result<Vec<ValidatorUpdate>, StakeError> {
        state.validate()?;

        self.set_params(&state.params)?;
        self.set_pool(&state.pool)?;
        for validator in &state.validators {
            self.set_validator(ctx, validator.clone())?;
        }
        for delegation in &state.bonds {
            self.set_delegation(delegation)?;
        }

        let updates = self.get_tendermint_updates()?;
        info!(
            validators = state.validators.len(),
            bonds = state.bonds.len(),
            active = updates.len(),
            "Genesis loaded"
        );
        Ok(updates)
    }

    /// Export the full keeper state.
    ///
    /// Validators are listed by address and keep their stamps; delegations
    /// are listed by delegator then validator.
    pub fn export_genesis(&self) -> Result<GenesisState, StakeError> {
        Ok(GenesisState {
            params: self.get_params()?,
            pool: self.get_pool()?,
            validators: self.get_all_validators()?,
            bonds: self.get_bonds(usize::MAX)?,
        })
    }
}

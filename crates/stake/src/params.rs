//! Parameter and pool registers.

use crate::keys;
use crate::{Keeper, StakeError};
use bondset_storage::KvStore;
use bondset_types::{Params, Pool};
use tracing::debug;

impl<S: KvStore> Keeper<S> {
    /// Current parameters, or the defaults before the first write.
    pub fn get_params(&self) -> Result<Params, StakeError> {
        Ok(self.read(keys::PARAMS_KEY)?.unwrap_or_default())
    }

    /// Replace the parameters.
    ///
    /// A change of `max_validators` is reflected in
    /// [`get_validators_bonded_by_power`](Self::get_validators_bonded_by_power)
    /// immediately and reported to the consensus engine by the next validator
    /// mutation's diff cycle.
    pub fn set_params(&mut self, params: &Params) -> Result<(), StakeError> {
        debug!(max_validators = params.max_validators, "Params written");
        self.write(keys::PARAMS_KEY.to_vec(), params)
    }

    /// Current pool, or the initial pool before the first write.
    pub fn get_pool(&self) -> Result<Pool, StakeError> {
        Ok(self.read(keys::POOL_KEY)?.unwrap_or_else(Pool::initial))
    }

    /// Replace the pool. Stored verbatim.
    pub fn set_pool(&mut self, pool: &Pool) -> Result<(), StakeError> {
        self.write(keys::POOL_KEY.to_vec(), pool)
    }
}

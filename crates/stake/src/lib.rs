//! Validator-set bookkeeping for a proof-of-stake state machine.
//!
//! The [`Keeper`] tracks every registered validator and its delegations,
//! derives the ranked active validator set, and accumulates the power
//! changes the consensus engine has to apply.
//!
//! # Components
//!
//! - **Validator store**: primary record per validator address.
//! - **Power index**: derived sorted view, written in the same call as the
//!   primary record. An ascending scan yields rank order.
//! - **Update tracker**: pending `(pub_key, power)` notifications, one per
//!   validator whose power or membership changed since the last clear.
//! - **Delegation store**: records keyed by `(delegator, validator)`.
//! - **Registers**: [`Params`](bondset_types::Params) and
//!   [`Pool`](bondset_types::Pool) singletons with defaults.
//!
//! # Determinism
//!
//! All state, including the active-set snapshot and the update sequence
//! counter used for tie-breaking, lives in the [`KvStore`]. Ranking uses
//! integer power and byte-ordered keys only. Replicas that apply the same
//! calls to stores with the same contents end with identical bytes and
//! identical update sequences.
//!
//! # Block lifecycle
//!
//! ```ignore
//! let mut cache = CacheStore::new(&mut storage);
//! let mut keeper = Keeper::new(&mut cache);
//! keeper.set_validator(&ctx, validator)?;
//! let updates = keeper.get_tendermint_updates()?;
//! keeper.clear_tendermint_updates()?;
//! cache.commit();
//! ```
//!
//! [`KvStore`]: bondset_storage::KvStore

mod codec;
mod delegation;
mod error;
mod genesis;
mod keeper;
mod keys;
mod params;
mod power_index;
mod reader;
mod updates;
mod validator;

pub use codec::{decode, encode};
pub use error::StakeError;
pub use genesis::GenesisState;
pub use keeper::{BlockContext, Keeper};
pub use reader::ValidatorPowerReader;

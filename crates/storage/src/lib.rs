//! Storage traits and shared utilities.
//!
//! This crate defines the ordered key-value abstraction the keeper persists
//! its state through, along with the helpers every backend needs.
//!
//! # Design
//!
//! The keeper never owns a database. The host hands it anything implementing
//! [`KvStore`]: the in-memory backend in `bondset-storage-memory`, a host
//! chain's substore, or a [`CacheStore`] layered over either.
//!
//! Keys are raw bytes compared lexicographically. Range scans must yield
//! entries in ascending key order; determinism of everything built on top
//! (the power ranking, the delegation listing) depends on it.
//!
//! # Atomicity
//!
//! A [`CacheStore`] buffers writes over a parent store. Reads see the
//! buffered writes; nothing reaches the parent until [`CacheStore::commit`].
//! Dropping or [`CacheStore::discard`]ing the cache abandons every write.

#![warn(missing_docs)]

mod cache;
pub mod keys;
mod store;

pub use cache::CacheStore;
pub use store::{KvIter, KvStore};

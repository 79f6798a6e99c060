//! # In-Memory Storage
//!
//! In-memory [`KvStore`](bondset_storage::KvStore) implementation for tests,
//! simulations and light hosts.
//!
//! Uses `im::OrdMap` for O(1) structural-sharing clones, so forking a replica
//! or snapshotting state before a risky mutation costs nothing.

mod storage;

pub use storage::MemStorage;

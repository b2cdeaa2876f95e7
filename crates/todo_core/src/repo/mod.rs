//! Persistence adapter between the task collection and the storage medium.
//!
//! # Responsibility
//! - Define the load/save contract used by the task store.
//! - Keep the serialized blob format inside the persistence boundary.
//!
//! # Invariants
//! - `load` never fails: missing or corrupt data yields an empty collection.
//! - `save` writes the full collection, never a partial delta.

pub mod task_repo;

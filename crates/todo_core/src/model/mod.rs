//! Task list domain model.
//!
//! # Responsibility
//! - Define the task record shared by store, persistence and view layers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Task text is trimmed and never empty.

pub mod task;

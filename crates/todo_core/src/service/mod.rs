//! Core use-case services.
//!
//! # Responsibility
//! - Own task state and route every mutation through persistence.
//! - Keep controller and view layers decoupled from storage details.

pub mod task_store;

//! Core of a local task list.
//!
//! A `TaskStore` owns the ordered task collection and writes it through a
//! `TaskRepository` to a key-value `storage` medium after every change. The
//! `view` module turns the collection into markup and the `controller`
//! maps user events onto store calls followed by a full re-render.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod surface;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use controller::{Confirm, Controller, EditKey, Node, NodeRole, Outcome, UiEvent};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_repo::{KvTaskRepository, RepoError, RepoResult, TaskRepository, STORAGE_KEY};
pub use service::task_store::{StoreError, StoreResult, TaskStore, TaskSummary};
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use surface::{HeadlessSurface, Surface};
pub use view::{escape_html, render, ListView, RowView, View};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

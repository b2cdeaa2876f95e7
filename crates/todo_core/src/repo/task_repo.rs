//! Task collection persistence over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole collection as one JSON array under a fixed key.
//! - Recover from absent or unreadable blobs with an empty collection.
//!
//! # Invariants
//! - A blob written by `save` deserializes to exactly the saved collection.
//! - Loaded collections never contain duplicate ids or empty text.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, error, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the collection blob is stored.
pub const STORAGE_KEY: &str = "todo_app_tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for task collection persistence.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// The blob is not a JSON array of task records.
    Malformed(serde_json::Error),
    /// The blob parsed but violates collection invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Malformed(err) => write!(f, "malformed task blob: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Malformed(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Load/save contract for the task collection.
pub trait TaskRepository {
    /// Reads the stored collection; `Ok(None)` when nothing was ever saved.
    fn try_load(&self) -> RepoResult<Option<Vec<Task>>>;

    /// Overwrites the stored collection.
    fn save(&mut self, tasks: &[Task]) -> RepoResult<()>;

    /// Lenient load used at startup.
    ///
    /// Absent data is an empty collection. Unreadable data is logged and
    /// also treated as empty; the error never reaches the caller.
    fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(Some(tasks)) => tasks,
            Ok(None) => {
                debug!("event=tasks_load module=repo status=empty");
                Vec::new()
            }
            Err(err @ RepoError::Storage(_)) => {
                error!("event=tasks_load module=repo status=error error={err}");
                Vec::new()
            }
            Err(err) => {
                warn!("event=tasks_load module=repo status=corrupt error={err}");
                Vec::new()
            }
        }
    }
}

/// Persists the collection as a JSON blob in any `KeyValueStore`.
pub struct KvTaskRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    /// Uses the default `STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrows the underlying storage medium.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn try_load(&self) -> RepoResult<Option<Vec<Task>>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let tasks = decode_tasks(&raw)?;
        debug!(
            "event=tasks_load module=repo status=ok count={}",
            tasks.len()
        );
        Ok(Some(tasks))
    }

    fn save(&mut self, tasks: &[Task]) -> RepoResult<()> {
        let blob = encode_tasks(tasks)?;
        self.store.set(&self.key, &blob)?;
        debug!(
            "event=tasks_save module=repo status=ok count={} bytes={}",
            tasks.len(),
            blob.len()
        );
        Ok(())
    }
}

/// Serializes a collection into the persisted blob format.
pub fn encode_tasks(tasks: &[Task]) -> RepoResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses and validates a persisted blob.
///
/// Text with surrounding whitespace is trimmed; blank text, empty ids and
/// duplicate ids reject the whole blob.
pub fn decode_tasks(raw: &str) -> RepoResult<Vec<Task>> {
    let mut tasks: Vec<Task> = serde_json::from_str(raw)?;
    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());

    for (index, task) in tasks.iter_mut().enumerate() {
        task.validate().map_err(|err| invalid_record(index, &err))?;
        if task.text.trim().len() != task.text.len() {
            task.text = task.text.trim().to_string();
        }
        if !seen.insert(task.id.clone()) {
            return Err(RepoError::InvalidData(format!(
                "duplicate task id `{}` at index {index}",
                task.id
            )));
        }
    }

    Ok(tasks)
}

fn invalid_record(index: usize, err: &TaskValidationError) -> RepoError {
    RepoError::InvalidData(format!("record {index}: {err}"))
}

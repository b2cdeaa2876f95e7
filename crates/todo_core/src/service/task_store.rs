//! In-memory task collection with write-through persistence.
//!
//! # Responsibility
//! - Own the ordered task collection for the running session.
//! - Persist the full collection after every effective mutation.
//!
//! # Invariants
//! - Only `TaskStore` mutates the collection.
//! - Newest tasks come first; ids are unique.
//! - After a mutating call returns `Ok`, the repository holds exactly
//!   `tasks()`.
//! - Calls that change nothing (unknown id, blank text) do not write.

use crate::model::task::{normalize_text, Task, TaskId};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while persisting a mutation.
///
/// The in-memory collection keeps the mutation; the next successful write
/// brings the stored copy back in line.
#[derive(Debug)]
pub enum StoreError {
    Persist(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// Active/total counts shown in the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub active: usize,
    pub total: usize,
}

impl TaskSummary {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            active: tasks.iter().filter(|task| task.is_active()).count(),
            total: tasks.len(),
        }
    }

    pub fn completed(&self) -> usize {
        self.total - self.active
    }
}

impl Display for TaskSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} active / {} total", self.active, self.total)
    }
}

/// Task collection owner.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Builds the store from whatever the repository can load.
    pub fn open(repo: R) -> Self {
        let tasks = repo.load();
        info!(
            "event=store_open module=service status=ok count={}",
            tasks.len()
        );
        Self { repo, tasks }
    }

    /// Current collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::of(&self.tasks)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Adds a task at the front of the list.
    ///
    /// Returns `Ok(None)` without touching anything when `raw_text` is blank.
    pub fn add(&mut self, raw_text: &str) -> StoreResult<Option<TaskId>> {
        let Ok(task) = Task::new(raw_text) else {
            debug!("event=task_add module=service status=rejected reason=empty_text");
            return Ok(None);
        };
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.persist("task_add")?;
        Ok(Some(id))
    }

    /// Flips completion of `id`; `false` when no such task exists.
    pub fn toggle(&mut self, id: &TaskId) -> StoreResult<bool> {
        let Some(task) = self.find_mut(id) else {
            return Ok(false);
        };
        task.toggle();
        self.persist("task_toggle")?;
        Ok(true)
    }

    /// Replaces the text of `id`.
    ///
    /// Blank input leaves the task unchanged, which cancels an edit.
    pub fn set_text(&mut self, id: &TaskId, raw_text: &str) -> StoreResult<bool> {
        let Some(text) = normalize_text(raw_text) else {
            return Ok(false);
        };
        let Some(task) = self.find_mut(id) else {
            return Ok(false);
        };
        if task.text == text {
            return Ok(false);
        }
        task.text = text;
        self.persist("task_edit")?;
        Ok(true)
    }

    /// Deletes `id`; a second call for the same id returns `false`.
    pub fn remove(&mut self, id: &TaskId) -> StoreResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.persist("task_remove")?;
        Ok(true)
    }

    /// Removes every completed task and returns how many were dropped.
    pub fn clear_completed(&mut self) -> StoreResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist("tasks_clear_completed")?;
        }
        Ok(removed)
    }

    /// Empties the collection.
    ///
    /// Performs no confirmation; callers gate this behind the user's answer.
    pub fn clear_all(&mut self) -> StoreResult<usize> {
        let removed = self.tasks.len();
        if removed > 0 {
            self.tasks.clear();
            self.persist("tasks_clear_all")?;
        }
        Ok(removed)
    }

    fn find_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    fn persist(&mut self, event: &str) -> StoreResult<()> {
        self.repo.save(&self.tasks)?;
        info!(
            "event={event} module=service status=ok count={}",
            self.tasks.len()
        );
        Ok(())
    }
}

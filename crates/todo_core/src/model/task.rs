//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its opaque identifier.
//! - Normalize and validate user-entered task text.
//!
//! # Invariants
//! - `id` is stable for the task lifetime and never reused.
//! - `text` is whitespace-trimmed and non-empty.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Fresh ids are UUID v7 strings: a millisecond timestamp followed by random
/// bits, so two tasks created in the same millisecond still differ. Ids read
/// back from storage are kept verbatim; nothing inspects their structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a new collision-resistant id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing id value (for example one recovered from a row's
    /// `data-id` attribute).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Validation errors for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Identifier is empty.
    EmptyId,
    /// Text is empty after trimming.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id cannot be empty"),
            Self::EmptyText => write!(f, "task text cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do item.
///
/// Serialized as `{ "id", "text", "completed" }`, the persisted blob shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Creates an open task with a fresh id from raw user input.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `raw_text` is empty or all whitespace.
    pub fn new(raw_text: &str) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::generate(), raw_text)
    }

    /// Creates an open task with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `EmptyId` for an empty id.
    /// - Returns `EmptyText` when `raw_text` trims to nothing.
    pub fn with_id(id: TaskId, raw_text: &str) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            text: normalize_text(raw_text).ok_or(TaskValidationError::EmptyText)?,
            completed: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Replaces the text when `raw_text` is non-empty after trimming.
    ///
    /// Returns `false` and leaves the record untouched otherwise.
    pub fn set_text(&mut self, raw_text: &str) -> bool {
        match normalize_text(raw_text) {
            Some(text) => {
                self.text = text;
                true
            }
            None => false,
        }
    }

    /// Returns whether the task still counts as active.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Trims user input; `None` means the input must be rejected.
pub fn normalize_text(raw_text: &str) -> Option<String> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

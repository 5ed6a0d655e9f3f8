//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record rendered by the home and edit screens.
//! - Normalize and validate user-entered text before it reaches the list.
//!
//! # Invariants
//! - `id` is stable for the task lifetime and never reused.
//! - `title` and `description` are non-empty after trimming.
//! - `completed` is the source of truth for completion; `TaskStatus` is derived.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable opaque identifier for a task.
///
/// Never derived from list position, so deleting one task cannot shift the
/// identity of another.
pub type TaskId = Uuid;

/// Completion state derived from `Task::completed`.
///
/// `Archived` is a reserved extension: adding it means persisting a status
/// field next to `completed`, which the stored format does not carry today.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Still open.
    Pending,
    /// Checked off by the user.
    Completed,
}

impl TaskStatus {
    /// Stable lowercase label used by FFI and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// Validation failures for task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    EmptyTitle,
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyDescription => write!(f, "task description must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Creates a pending task with a generated id.
    ///
    /// Both inputs are trimmed before they are stored.
    pub fn new(
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, description)
    }

    /// Creates a pending task with a caller-provided id.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `EmptyTitle` / `EmptyDescription` when either input is blank.
    pub fn with_id(
        id: TaskId,
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        let (title, description) = validate_text(title.as_ref(), description.as_ref())?;
        Ok(Self {
            id,
            title,
            description,
            completed: false,
        })
    }

    /// Re-checks every field invariant.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        validate_text(&self.title, &self.description).map(|_| ())
    }

    pub fn status(&self) -> TaskStatus {
        if self.completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

/// Trims user input and rejects blank title or description.
///
/// Returns the trimmed `(title, description)` pair ready for storage.
pub fn validate_text(
    title: &str,
    description: &str,
) -> Result<(String, String), TaskValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let description = description.trim();
    if description.is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    Ok((title.to_string(), description.to_string()))
}

/// Persisted shape accepted on decode.
///
/// Older blobs written by the add screen carried no `id`; those records get a
/// fresh one here so identity is never positional.
#[derive(Deserialize)]
struct TaskRecord {
    #[serde(default)]
    id: Option<TaskId>,
    title: String,
    description: String,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let mut task = Task::with_id(
            record.id.unwrap_or_else(Uuid::new_v4),
            record.title,
            record.description,
        )?;
        task.completed = record.completed;
        Ok(task)
    }
}

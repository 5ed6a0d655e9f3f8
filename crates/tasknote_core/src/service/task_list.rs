//! Task list container.
//!
//! # Responsibility
//! - Own the canonical in-memory, insertion-ordered task sequence.
//! - Route every create/update/toggle/delete through one place.
//! - Mirror the full sequence to the repository after each mutation.
//!
//! # Invariants
//! - Task ids are unique within the list at any instant.
//! - Memory is the authority: a failed write never rolls a mutation back and
//!   never fails the mutating call. Storage may trail memory until the next
//!   successful write, so a restart after a failed write can lose changes.
//! - Filtered views are recomputed on every call and keep backing order.
//! - Startup never fails: missing or unreadable data yields an empty list.
//! - Writes run inline; a mutating call returns once its save has finished.

use crate::model::task::{validate_text, Task, TaskId, TaskStatus, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors surfaced to task list callers.
#[derive(Debug)]
pub enum TaskListError {
    /// Blank title or description.
    Validation(TaskValidationError),
    /// No task with this id.
    NotFound(TaskId),
    /// Storage write failed. Only returned by `TaskList::persist_now`.
    Persistence(RepoError),
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for TaskListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskListError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Storage operation that last failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOp {
    Load,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceFailure {
    pub op: PersistOp,
    pub message: String,
}

/// Running record of how well storage keeps up with memory.
///
/// Lets the view layer surface "changes not saved" without the mutators
/// themselves failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistenceHealth {
    pub successful_writes: u64,
    pub failed_writes: u64,
    /// Cleared by the next successful write or reload.
    pub last_failure: Option<PersistenceFailure>,
}

impl PersistenceHealth {
    /// `true` when storage is believed to match memory.
    pub fn is_healthy(&self) -> bool {
        self.last_failure.is_none()
    }

    fn record_ok(&mut self) {
        self.successful_writes += 1;
        self.last_failure = None;
    }

    /// Memory was just replaced by what storage holds; no write happened.
    fn record_in_sync(&mut self) {
        self.last_failure = None;
    }

    fn record_failure(&mut self, op: PersistOp, message: String) {
        if op == PersistOp::Save {
            self.failed_writes += 1;
        }
        self.last_failure = Some(PersistenceFailure { op, message });
    }
}

/// Single source of truth for the task collection.
///
/// Construct one per application run and pass it to whatever renders it.
pub struct TaskList<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    health: PersistenceHealth,
}

impl<R: TaskRepository> TaskList<R> {
    /// Hydrates a list from `repo`, degrading to empty on any load failure.
    pub fn load(repo: R) -> Self {
        let mut list = Self {
            repo,
            tasks: Vec::new(),
            health: PersistenceHealth::default(),
        };
        list.reload();
        list
    }

    /// Replaces memory with whatever storage currently holds.
    ///
    /// Unsaved in-memory changes are discarded. On failure the list is empty.
    pub fn reload(&mut self) {
        let started_at = Instant::now();
        match self.repo.load_tasks() {
            Ok(Some(tasks)) => {
                info!(
                    "event=tasks_load module=service status=ok source=stored count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                self.tasks = tasks;
                self.health.record_in_sync();
            }
            Ok(None) => {
                info!(
                    "event=tasks_load module=service status=ok source=empty count=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                self.tasks.clear();
                self.health.record_in_sync();
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=service status=error fallback=empty duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                self.tasks.clear();
                self.health.record_failure(PersistOp::Load, err.to_string());
            }
        }
    }

    /// Appends a pending task and returns its id.
    ///
    /// # Errors
    /// - `Validation` when title or description is blank after trimming.
    pub fn add_task(
        &mut self,
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<TaskId, TaskListError> {
        let task = Task::new(title, description)?;
        let task_id = task.id;
        self.tasks.push(task);
        debug!("event=task_add module=service status=ok task_id={task_id}");
        self.persist_quietly("add");
        Ok(task_id)
    }

    /// Replaces title and description, keeping id and completion.
    ///
    /// # Errors
    /// - `Validation` on blank input; checked before the lookup.
    /// - `NotFound` when `id` is not in the list.
    pub fn update_task(
        &mut self,
        id: TaskId,
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<(), TaskListError> {
        let (title, description) = validate_text(title.as_ref(), description.as_ref())?;
        let index = self.position(id)?;
        let task = &mut self.tasks[index];
        task.title = title;
        task.description = description;
        debug!("event=task_update module=service status=ok task_id={id}");
        self.persist_quietly("update");
        Ok(())
    }

    /// Flips completion and returns the new `completed` value.
    pub fn toggle_completion(&mut self, id: TaskId) -> Result<bool, TaskListError> {
        let index = self.position(id)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        let completed = task.completed;
        debug!("event=task_toggle module=service status=ok task_id={id} completed={completed}");
        self.persist_quietly("toggle");
        Ok(completed)
    }

    /// Sets completion explicitly from a status value.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<(), TaskListError> {
        let index = self.position(id)?;
        self.tasks[index].completed = match status {
            TaskStatus::Pending => false,
            TaskStatus::Completed => true,
        };
        debug!(
            "event=task_set_status module=service status=ok task_id={id} task_status={}",
            status.as_str()
        );
        self.persist_quietly("set_status");
        Ok(())
    }

    /// Removes one task and hands it back to the caller.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, TaskListError> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        debug!("event=task_delete module=service status=ok task_id={id}");
        self.persist_quietly("delete");
        Ok(removed)
    }

    /// Writes the current sequence and reports failure to the caller.
    ///
    /// Mutators never fail on storage errors; this is the path for callers
    /// that want to retry a save or confirm one succeeded.
    pub fn persist_now(&mut self) -> Result<(), TaskListError> {
        self.persist("flush").map_err(TaskListError::Persistence)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.is_pending()).collect()
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| !task.is_pending()).collect()
    }

    pub fn persistence_health(&self) -> &PersistenceHealth {
        &self.health
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Tears the list down, returning the repository (e.g. to reload later).
    pub fn into_repository(self) -> R {
        self.repo
    }

    fn position(&self, id: TaskId) -> Result<usize, TaskListError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskListError::NotFound(id))
    }

    fn persist_quietly(&mut self, action: &'static str) {
        // Failure is already logged and recorded in `health`.
        let _ = self.persist(action);
    }

    fn persist(&mut self, action: &'static str) -> Result<(), RepoError> {
        let started_at = Instant::now();
        match self.repo.save_tasks(&self.tasks) {
            Ok(()) => {
                debug!(
                    "event=tasks_persist module=service status=ok action={} count={} duration_ms={}",
                    action,
                    self.tasks.len(),
                    started_at.elapsed().as_millis()
                );
                self.health.record_ok();
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=tasks_persist module=service status=error action={} count={} duration_ms={} error={}",
                    action,
                    self.tasks.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                self.health.record_failure(PersistOp::Save, err.to_string());
                Err(err)
            }
        }
    }
}

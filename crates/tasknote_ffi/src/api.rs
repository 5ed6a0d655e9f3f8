//! FFI use-case API for the Flutter screens.
//!
//! # Responsibility
//! - Expose task list operations to Dart via FRB as plain envelopes.
//! - Own the one task list instance that lives for the app run.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Task list calls made before `init_task_list` fail with a message.
//! - Ids cross the boundary as UUID strings.

use crate::config::{resolve_store_backend, StoreBackend};
use log::{error, info};
use std::sync::{Mutex, PoisonError};
use tasknote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_store,
    ping as ping_inner, KeyValueStore, KvTaskRepository, MemoryKeyValueStore, Task, TaskId,
    TaskList, TaskListError, TaskStatus,
};
use uuid::Uuid;

type SharedStore = Box<dyn KeyValueStore + Send>;
type SharedTaskList = TaskList<KvTaskRepository<SharedStore>>;

struct AppTaskList {
    backend: &'static str,
    list: SharedTaskList,
}

static TASK_LIST: Mutex<Option<AppTaskList>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Task projection rendered by the home and edit screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// `pending|completed`.
    pub status: String,
}

/// Generic action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected task ID, when there is one.
    pub task_id: Option<String>,
    /// Human-readable message for diagnostics/UI alerts.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: Option<TaskId>) -> Self {
        Self {
            ok: true,
            task_id: task_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Storage health snapshot for a "changes not saved" indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceStatus {
    pub initialized: bool,
    /// `memory|file`, empty before init.
    pub backend: String,
    pub healthy: bool,
    pub successful_writes: u64,
    pub failed_writes: u64,
    pub last_error: Option<String>,
}

/// Opens the app-lifetime task list and hydrates it from storage.
///
/// `db_path`: SQLite file path, `":memory:"` for the in-memory store, or
/// `None` to use `TASKNOTE_STORE` / `TASKNOTE_DB_PATH` / the temp directory.
///
/// # FFI contract
/// - Call once at app start; later calls keep the first instance.
/// - Unreadable stored data yields an empty list, not an error.
/// - Fails only when the store itself cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn init_task_list(db_path: Option<String>) -> TaskActionResponse {
    let mut slot = TASK_LIST.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return TaskActionResponse::success("Task list already initialized.", None);
    }

    let backend = resolve_store_backend(db_path.as_deref());
    let store: SharedStore = match &backend {
        StoreBackend::Memory => Box::new(MemoryKeyValueStore::new()),
        StoreBackend::File(path) => match open_store(path) {
            Ok(store) => Box::new(store),
            Err(err) => {
                error!(
                    "event=task_list_init module=ffi status=error backend=file error={}",
                    err
                );
                return TaskActionResponse::failure(format!("init_task_list failed: {err}"));
            }
        },
    };

    let list = TaskList::load(KvTaskRepository::new(store));
    info!(
        "event=task_list_init module=ffi status=ok backend={} count={}",
        backend.label(),
        list.len()
    );
    *slot = Some(AppTaskList {
        backend: backend.label(),
        list,
    });
    TaskActionResponse::success("Task list ready.", None)
}

/// Adds a task from the add screen.
///
/// Blank title or description fails with a user-facing message.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String, description: String) -> TaskActionResponse {
    mutate("task_add", |list| {
        list.add_task(&title, &description)
            .map(|id| TaskActionResponse::success("Task saved.", Some(id)))
    })
}

/// Edits title and description of an existing task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(task_id: String, title: String, description: String) -> TaskActionResponse {
    with_task_id("task_update", &task_id, |list, id| {
        list.update_task(id, &title, &description)
            .map(|()| TaskActionResponse::success("Task updated.", Some(id)))
    })
}

/// Flips completion; the message names the new state.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> TaskActionResponse {
    with_task_id("task_toggle", &task_id, |list, id| {
        list.toggle_completion(id).map(|completed| {
            let message = if completed {
                "Task completed."
            } else {
                "Task reopened."
            };
            TaskActionResponse::success(message, Some(id))
        })
    })
}

/// Sets completion from a status label (`pending|completed`).
#[flutter_rust_bridge::frb(sync)]
pub fn task_set_status(task_id: String, status: String) -> TaskActionResponse {
    let Some(status) = parse_status(&status) else {
        return TaskActionResponse::failure(format!(
            "task_set_status failed: unsupported status `{}`; expected pending|completed",
            status.trim()
        ));
    };
    with_task_id("task_set_status", &task_id, |list, id| {
        list.set_status(id, status)
            .map(|()| TaskActionResponse::success("Task status updated.", Some(id)))
    })
}

/// Deletes one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> TaskActionResponse {
    with_task_id("task_delete", &task_id, |list, id| {
        list.delete_task(id)
            .map(|task| TaskActionResponse::success("Task deleted.", Some(task.id)))
    })
}

/// Forces a save and reports whether storage accepted it.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_flush() -> TaskActionResponse {
    mutate("tasks_flush", |list| {
        list.persist_now()
            .map(|()| TaskActionResponse::success("Tasks saved.", None))
    })
}

/// Returns one task for edit-screen prefill.
#[flutter_rust_bridge::frb(sync)]
pub fn task_get(task_id: String) -> Option<TaskItem> {
    let id = parse_task_id(&task_id).ok()?;
    read(|list| list.get_task(id).map(to_task_item)).flatten()
}

/// Returns all tasks in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> Vec<TaskItem> {
    read(|list| list.tasks().iter().map(to_task_item).collect()).unwrap_or_default()
}

/// Returns pending tasks in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_pending() -> Vec<TaskItem> {
    read(|list| list.pending_tasks().into_iter().map(to_task_item).collect())
        .unwrap_or_default()
}

/// Returns completed tasks in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_completed() -> Vec<TaskItem> {
    read(|list| list.completed_tasks().into_iter().map(to_task_item).collect())
        .unwrap_or_default()
}

/// Reports storage health of the app task list.
#[flutter_rust_bridge::frb(sync)]
pub fn persistence_status() -> PersistenceStatus {
    let slot = TASK_LIST.lock().unwrap_or_else(PoisonError::into_inner);
    match slot.as_ref() {
        Some(app) => {
            let health = app.list.persistence_health();
            PersistenceStatus {
                initialized: true,
                backend: app.backend.to_string(),
                healthy: health.is_healthy(),
                successful_writes: health.successful_writes,
                failed_writes: health.failed_writes,
                last_error: health
                    .last_failure
                    .as_ref()
                    .map(|failure| failure.message.clone()),
            }
        }
        None => PersistenceStatus {
            initialized: false,
            backend: String::new(),
            healthy: true,
            successful_writes: 0,
            failed_writes: 0,
            last_error: None,
        },
    }
}

fn mutate(
    operation: &str,
    f: impl FnOnce(&mut SharedTaskList) -> Result<TaskActionResponse, TaskListError>,
) -> TaskActionResponse {
    let mut slot = TASK_LIST.lock().unwrap_or_else(PoisonError::into_inner);
    let Some(app) = slot.as_mut() else {
        return TaskActionResponse::failure(format!(
            "{operation} failed: task list not initialized"
        ));
    };
    match f(&mut app.list) {
        Ok(response) => response,
        Err(err) => TaskActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn with_task_id(
    operation: &str,
    raw_id: &str,
    f: impl FnOnce(&mut SharedTaskList, TaskId) -> Result<TaskActionResponse, TaskListError>,
) -> TaskActionResponse {
    match parse_task_id(raw_id) {
        Ok(id) => mutate(operation, |list| f(list, id)),
        Err(message) => TaskActionResponse::failure(format!("{operation} failed: {message}")),
    }
}

fn read<T>(f: impl FnOnce(&SharedTaskList) -> T) -> Option<T> {
    let slot = TASK_LIST.lock().unwrap_or_else(PoisonError::into_inner);
    slot.as_ref().map(|app| f(&app.list))
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed).map_err(|_| format!("invalid task id `{trimmed}`"))
}

fn parse_status(raw: &str) -> Option<TaskStatus> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pending" => Some(TaskStatus::Pending),
        "completed" => Some(TaskStatus::Completed),
        _ => None,
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        completed: task.completed,
        status: task.status().as_str().to_string(),
    }
}

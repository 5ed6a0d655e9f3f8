//! Core domain logic for TaskNote.
//! This crate is the single source of truth for task list invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::task::{validate_text, Task, TaskId, TaskStatus, TaskValidationError};
pub use repo::task_repo::{
    decode_tasks, encode_tasks, KvTaskRepository, RepoError, RepoResult, TaskRepository,
    TASKS_KEY,
};
pub use service::task_list::{
    PersistOp, PersistenceFailure, PersistenceHealth, TaskList, TaskListError,
};
pub use store::{
    open_store, open_store_in_memory, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

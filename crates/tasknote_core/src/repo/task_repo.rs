//! Task repository contract and key-value implementation.
//!
//! # Responsibility
//! - Load and save the whole task sequence as one serialized blob.
//! - Keep the wire format (JSON array under `"tasks"`) inside core.
//!
//! # Invariants
//! - `save_tasks` writes the entire sequence; there are no partial writes.
//! - Decoding rejects the whole blob on any invalid record or duplicate id.

use crate::model::task::{Task, TaskId};
use crate::store::{KeyValueStore, StoreError};
use serde_json::error::Category;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the serialized task list.
pub const TASKS_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Persistence contract consumed by the task list.
pub trait TaskRepository {
    /// Returns `None` when no task list has ever been saved.
    fn load_tasks(&self) -> RepoResult<Option<Vec<Task>>>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Task repository storing JSON under `TASKS_KEY` of a key-value store.
pub struct KvTaskRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn load_tasks(&self) -> RepoResult<Option<Vec<Task>>> {
        match self.store.get(TASKS_KEY)? {
            Some(raw) => decode_tasks(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = encode_tasks(tasks)?;
        self.store.set(TASKS_KEY, &encoded)?;
        Ok(())
    }
}

/// Serializes tasks as a JSON array of objects, preserving order.
pub fn encode_tasks(tasks: &[Task]) -> RepoResult<String> {
    serde_json::to_string(tasks).map_err(RepoError::Encode)
}

/// Parses a JSON array produced by `encode_tasks` (or the legacy id-less form).
///
/// # Errors
/// - `InvalidData` for malformed JSON, invalid records, or repeated ids.
pub fn decode_tasks(raw: &str) -> RepoResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(raw).map_err(describe_decode_error)?;

    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate task id `{}`",
                task.id
            )));
        }
    }

    Ok(tasks)
}

/// Keeps only the error class and position; serde_json messages can quote
/// stored task text, which must not reach logs or health reports.
fn describe_decode_error(err: serde_json::Error) -> RepoError {
    let class = match err.classify() {
        Category::Io => "io error",
        Category::Syntax => "syntax error",
        Category::Data => "unexpected data",
        Category::Eof => "unexpected end of input",
    };
    RepoError::InvalidData(format!(
        "{class} at line {} column {}",
        err.line(),
        err.column()
    ))
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, RepoError};

    #[test]
    fn decode_rejects_duplicate_ids() {
        let raw = r#"[
            {"id":"11111111-2222-4333-8444-555555555555","title":"a","description":"b","completed":false},
            {"id":"11111111-2222-4333-8444-555555555555","title":"c","description":"d","completed":true}
        ]"#;
        let err = decode_tasks(raw).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("duplicate")));
    }

    #[test]
    fn decode_rejects_blank_title() {
        let raw = r#"[{"title":"  ","description":"b","completed":false}]"#;
        let err = decode_tasks(raw).unwrap_err();
        assert!(
            matches!(&err, RepoError::InvalidData(message) if message.starts_with("unexpected data")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn decode_error_does_not_echo_stored_text() {
        let raw = r#"[{"title":"Buy milk","description":"secret diagnosis","completed":"secret diagnosis"}]"#;
        let message = decode_tasks(raw).unwrap_err().to_string();
        assert!(!message.contains("secret diagnosis"), "leaked text: {message}");
        assert!(message.contains("line 1"), "unexpected error: {message}");
    }

    #[test]
    fn decode_rejects_non_array_blob() {
        assert!(decode_tasks("{\"tasks\":[]}").is_err());
        assert!(decode_tasks("not json").is_err());
    }
}

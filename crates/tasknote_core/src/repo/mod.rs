//! Repository layer between the task list and key-value storage.
//!
//! # Responsibility
//! - Define the load/save contract the task list depends on.
//! - Isolate serialization details from the container logic.
//!
//! # Invariants
//! - Loaded data is validated before it reaches the container.

pub mod task_repo;

//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the task record shared by the store, container and FFI layers.
//!
//! # Invariants
//! - Every task is identified by a stable, non-nil `TaskId`.
//! - Deletion removes the record; there are no tombstones.

pub mod task;

//! Core use-case services.
//!
//! # Responsibility
//! - Hold the task list container that screens read from and mutate.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_list;

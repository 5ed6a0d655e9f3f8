//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tasknote_core` linkage without the Flutter runtime.
//! - Run one add/toggle/reload cycle against an in-memory store.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;
use tasknote_core::{KvTaskRepository, MemoryKeyValueStore, TaskList};

fn main() -> ExitCode {
    println!("tasknote_core ping={}", tasknote_core::ping());
    println!("tasknote_core version={}", tasknote_core::core_version());

    match task_list_probe() {
        Ok((pending, completed)) => {
            println!("task_list probe=ok pending={pending} completed={completed}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("task_list probe=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn task_list_probe() -> Result<(usize, usize), tasknote_core::TaskListError> {
    let mut list = TaskList::load(KvTaskRepository::new(MemoryKeyValueStore::new()));
    let first = list.add_task("probe one", "smoke")?;
    list.add_task("probe two", "smoke")?;
    list.toggle_completion(first)?;
    list.persist_now()?;

    let reloaded = TaskList::load(list.into_repository());
    Ok((reloaded.pending_tasks().len(), reloaded.completed_tasks().len()))
}

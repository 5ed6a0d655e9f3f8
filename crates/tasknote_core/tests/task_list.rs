use std::collections::HashSet;
use tasknote_core::{
    KvTaskRepository, MemoryKeyValueStore, TaskId, TaskList, TaskListError, TaskStatus,
    TaskValidationError,
};
use uuid::Uuid;

fn empty_list() -> TaskList<KvTaskRepository<MemoryKeyValueStore>> {
    TaskList::load(KvTaskRepository::new(MemoryKeyValueStore::new()))
}

fn ids<'a>(tasks: impl IntoIterator<Item = &'a tasknote_core::Task>) -> Vec<TaskId> {
    tasks.into_iter().map(|task| task.id).collect()
}

#[test]
fn load_from_empty_store_starts_empty_and_healthy() {
    let list = empty_list();
    assert!(list.is_empty());
    assert!(list.persistence_health().is_healthy());
}

#[test]
fn add_task_appends_pending_task_in_insertion_order() {
    let mut list = empty_list();

    let first = list.add_task("Buy milk", "2%").unwrap();
    let second = list.add_task("Pay rent", "due 1st").unwrap();

    assert_eq!(ids(list.tasks()), vec![first, second]);
    let task = list.get_task(first).unwrap();
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2%");
    assert!(!task.completed);
}

#[test]
fn add_task_rejects_blank_input_and_leaves_list_unchanged() {
    let mut list = empty_list();
    list.add_task("keep", "me").unwrap();
    let before = list.tasks().to_vec();

    let title_err = list.add_task("", "x").unwrap_err();
    assert!(matches!(
        title_err,
        TaskListError::Validation(TaskValidationError::EmptyTitle)
    ));
    let description_err = list.add_task("x", "   ").unwrap_err();
    assert!(matches!(
        description_err,
        TaskListError::Validation(TaskValidationError::EmptyDescription)
    ));

    assert_eq!(list.tasks(), before.as_slice());
}

#[test]
fn update_task_replaces_text_and_keeps_identity_and_completion() {
    let mut list = empty_list();
    let id = list.add_task("draft", "first").unwrap();
    list.toggle_completion(id).unwrap();

    list.update_task(id, " final ", "second").unwrap();

    let task = list.get_task(id).unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.title, "final");
    assert_eq!(task.description, "second");
    assert!(task.completed);
}

#[test]
fn update_missing_task_returns_not_found_and_leaves_list_unchanged() {
    let mut list = empty_list();
    list.add_task("a", "b").unwrap();
    let before = list.tasks().to_vec();
    let missing = Uuid::new_v4();

    let err = list.update_task(missing, "x", "y").unwrap_err();
    assert!(matches!(err, TaskListError::NotFound(id) if id == missing));
    assert_eq!(list.tasks(), before.as_slice());
}

#[test]
fn update_task_validates_before_lookup() {
    let mut list = empty_list();
    let err = list.update_task(Uuid::new_v4(), "", "y").unwrap_err();
    assert!(matches!(err, TaskListError::Validation(_)));
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut list = empty_list();
    let id = list.add_task("a", "b").unwrap();

    assert!(list.toggle_completion(id).unwrap());
    assert!(!list.toggle_completion(id).unwrap());
    assert!(!list.get_task(id).unwrap().completed);
}

#[test]
fn set_status_is_explicit_and_idempotent() {
    let mut list = empty_list();
    let id = list.add_task("a", "b").unwrap();

    list.set_status(id, TaskStatus::Completed).unwrap();
    list.set_status(id, TaskStatus::Completed).unwrap();
    assert_eq!(list.get_task(id).unwrap().status(), TaskStatus::Completed);

    list.set_status(id, TaskStatus::Pending).unwrap();
    assert_eq!(list.get_task(id).unwrap().status(), TaskStatus::Pending);

    let missing = Uuid::new_v4();
    assert!(matches!(
        list.set_status(missing, TaskStatus::Completed).unwrap_err(),
        TaskListError::NotFound(id) if id == missing
    ));
}

#[test]
fn delete_removes_exactly_one_task_and_later_mutations_fail() {
    let mut list = empty_list();
    let keep = list.add_task("keep", "me").unwrap();
    let gone = list.add_task("drop", "me").unwrap();
    let also_keep = list.add_task("keep", "too").unwrap();

    let removed = list.delete_task(gone).unwrap();
    assert_eq!(removed.id, gone);
    assert_eq!(ids(list.tasks()), vec![keep, also_keep]);

    assert!(matches!(
        list.toggle_completion(gone).unwrap_err(),
        TaskListError::NotFound(_)
    ));
    assert!(matches!(
        list.update_task(gone, "x", "y").unwrap_err(),
        TaskListError::NotFound(_)
    ));
    assert!(matches!(
        list.delete_task(gone).unwrap_err(),
        TaskListError::NotFound(_)
    ));
}

#[test]
fn delete_does_not_shift_identity_of_other_tasks() {
    let mut list = empty_list();
    let first = list.add_task("first", "1").unwrap();
    let second = list.add_task("second", "2").unwrap();

    list.delete_task(first).unwrap();
    list.toggle_completion(second).unwrap();

    assert_eq!(list.get_task(second).unwrap().title, "second");
    assert!(list.get_task(second).unwrap().completed);
}

#[test]
fn pending_and_completed_views_partition_the_list() {
    let mut list = empty_list();
    let mut all = Vec::new();
    for index in 0..6 {
        let id = list
            .add_task(format!("task {index}"), format!("description {index}"))
            .unwrap();
        if index % 3 == 0 {
            list.toggle_completion(id).unwrap();
        }
        all.push(id);
    }

    let pending: HashSet<TaskId> = ids(list.pending_tasks()).into_iter().collect();
    let completed: HashSet<TaskId> = ids(list.completed_tasks()).into_iter().collect();

    assert!(pending.is_disjoint(&completed));
    let union: HashSet<TaskId> = pending.union(&completed).copied().collect();
    assert_eq!(union, all.iter().copied().collect::<HashSet<_>>());

    let ordered_pending: Vec<TaskId> = all
        .iter()
        .copied()
        .filter(|id| pending.contains(id))
        .collect();
    assert_eq!(ids(list.pending_tasks()), ordered_pending);
}

#[test]
fn scenario_buy_milk_and_pay_rent() {
    let mut list = empty_list();
    let task1 = list.add_task("Buy milk", "2%").unwrap();
    let task2 = list.add_task("Pay rent", "due 1st").unwrap();

    list.toggle_completion(task1).unwrap();

    assert_eq!(ids(list.pending_tasks()), vec![task2]);
    assert_eq!(ids(list.completed_tasks()), vec![task1]);
}

#[test]
fn every_mutation_is_written_through_to_storage() {
    let mut list = empty_list();
    let id = list.add_task("a", "b").unwrap();
    list.toggle_completion(id).unwrap();
    list.update_task(id, "c", "d").unwrap();

    let health = list.persistence_health();
    assert_eq!(health.successful_writes, 3);
    assert_eq!(health.failed_writes, 0);

    let reloaded = TaskList::load(list.into_repository());
    let task = reloaded.get_task(id).unwrap();
    assert_eq!(task.title, "c");
    assert!(task.completed);
}

#[test]
fn failed_validation_does_not_write() {
    let mut list = empty_list();
    list.add_task("", "").unwrap_err();
    assert_eq!(list.persistence_health().successful_writes, 0);
}

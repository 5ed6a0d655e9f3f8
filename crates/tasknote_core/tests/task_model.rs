use tasknote_core::{Task, TaskStatus, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_sets_defaults_and_trims_text() {
    let task = Task::new("  Buy milk ", " 2% ").unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2%");
    assert!(!task.completed);
    assert_eq!(task.status(), TaskStatus::Pending);
    assert!(task.is_pending());
}

#[test]
fn task_new_generates_distinct_ids() {
    let first = Task::new("a", "b").unwrap();
    let second = Task::new("a", "b").unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn task_new_rejects_blank_fields() {
    assert_eq!(
        Task::new("", "x").unwrap_err(),
        TaskValidationError::EmptyTitle
    );
    assert_eq!(
        Task::new("x", "  \n").unwrap_err(),
        TaskValidationError::EmptyDescription
    );
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Task::with_id(Uuid::nil(), "title", "description").unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn validate_catches_fields_blanked_after_construction() {
    let mut task = Task::new("title", "description").unwrap();
    task.description = "   ".to_string();
    assert_eq!(
        task.validate().unwrap_err(),
        TaskValidationError::EmptyDescription
    );
}

#[test]
fn status_follows_completed_flag() {
    let mut task = Task::new("title", "description").unwrap();
    task.completed = true;
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.status().as_str(), "completed");
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task = Task::with_id(id, "Pay rent", "due 1st").unwrap();
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Pay rent");
    assert_eq!(json["description"], "due 1st");
    assert_eq!(json["completed"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialize_assigns_id_to_legacy_record() {
    let value = serde_json::json!({
        "title": "Legacy",
        "description": "saved without id",
        "completed": true
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert!(!task.id.is_nil());
    assert!(task.completed);
}

#[test]
fn deserialize_defaults_missing_completed_to_pending() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Old",
        "description": "no flag"
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert!(!task.completed);
}

#[test]
fn deserialize_rejects_empty_description() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Title",
        "description": "",
        "completed": false
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("task description must not be empty"),
        "unexpected error: {err}"
    );
}

//! End-to-end behaviour of `TaskService` over a real task file.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use task_tracker_app::{ProjectConfig, TaskService, TaskServiceError};
use task_tracker_core::{Status, TaskFilter, TaskId, ValidationError};
use task_tracker_store_json::{JsonStore, StoreError};
use tempfile::TempDir;

/// Test helper: service over `tasks.json` inside a fresh temp dir.
fn setup() -> (TempDir, TaskService<JsonStore>) {
    let dir = TempDir::with_prefix("task-tracker-test-").expect("create temp dir");
    let path = ProjectConfig::default().store_path(dir.path());
    (dir, TaskService::new(JsonStore::new(path)))
}

fn id(value: u64) -> TaskId {
    TaskId::new(value).unwrap()
}

#[test]
fn first_add_on_empty_store() {
    let (_dir, service) = setup();

    assert_eq!(service.add("Buy groceries").unwrap(), id(1));

    let tasks = service.find(TaskFilter::All).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id(1));
    assert_eq!(tasks[0].description, "Buy groceries");
    assert_eq!(tasks[0].status, Status::Todo);
}

#[test]
fn deleted_id_is_not_reused_across_service_instances() {
    let (dir, service) = setup();
    service.add("Buy groceries").unwrap();
    assert!(service.delete(id(1)).unwrap());
    drop(service);

    let reopened = TaskService::new(JsonStore::new(dir.path().join("tasks.json")));
    assert_eq!(reopened.add("New task").unwrap(), id(2));
}

#[test]
fn update_on_empty_store_does_not_create_file() {
    let (dir, service) = setup();

    assert!(!service.update(id(99), "x").unwrap());
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn blank_add_leaves_store_unchanged() {
    let (dir, service) = setup();
    service.add("keep me").unwrap();
    let before = fs::read(dir.path().join("tasks.json")).unwrap();

    let err = service.add("").unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Validation(ValidationError::EmptyDescription)
    ));
    assert_eq!(fs::read(dir.path().join("tasks.json")).unwrap(), before);
}

#[test]
fn status_changes_are_visible_to_filters() {
    let (_dir, service) = setup();
    let groceries = service.add("Buy groceries").unwrap();
    let dinner = service.add("Cook dinner").unwrap();

    assert!(service.set_status(groceries, Status::Done).unwrap());
    assert!(service.set_status(dinner, Status::InProgress).unwrap());

    let ids = |filter: TaskFilter| -> Vec<TaskId> {
        service.find(filter).unwrap().into_iter().map(|t| t.id).collect()
    };
    assert_eq!(ids(Status::Done.into()), vec![groceries]);
    assert_eq!(ids(Status::InProgress.into()), vec![dinner]);
    assert!(ids(Status::Todo.into()).is_empty());
    assert_eq!(ids(TaskFilter::All), vec![groceries, dinner]);
}

#[test]
fn update_on_deleted_task_leaves_file_unchanged() {
    let (dir, service) = setup();
    service.add("first").unwrap();
    service.add("second").unwrap();
    assert!(service.delete(id(1)).unwrap());
    let before = fs::read(dir.path().join("tasks.json")).unwrap();

    assert!(!service.update(id(1), "revived").unwrap());
    assert!(!service.set_status(id(1), Status::Done).unwrap());
    assert!(!service.delete(id(1)).unwrap());
    assert_eq!(fs::read(dir.path().join("tasks.json")).unwrap(), before);
}

#[test]
fn corrupt_file_is_reported_and_not_overwritten() {
    let (dir, service) = setup();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "not json").unwrap();

    assert!(matches!(
        service.add("anything"),
        Err(TaskServiceError::Store(StoreError::Corrupt { .. }))
    ));
    assert!(matches!(
        service.find(TaskFilter::All),
        Err(TaskServiceError::Store(StoreError::Corrupt { .. }))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
}

#[test]
fn missing_parent_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let service = TaskService::new(JsonStore::new(dir.path().join("missing").join("tasks.json")));

    assert!(service.find(TaskFilter::All).unwrap().is_empty());
    assert!(matches!(
        service.add("Buy groceries"),
        Err(TaskServiceError::Store(StoreError::Io { .. }))
    ));
}

#[test]
fn timestamps_stay_ordered_through_mutations() {
    let (_dir, service) = setup();
    let created = service.add("Buy groceries").unwrap();
    service.update(created, "Buy groceries and cook dinner").unwrap();
    service.set_status(created, Status::Done).unwrap();

    let task = service.get(created).unwrap().unwrap();
    assert!(task.updated_at >= task.created_at);
    assert_eq!(task.status, Status::Done);
    assert_eq!(task.description, "Buy groceries and cook dinner");
}

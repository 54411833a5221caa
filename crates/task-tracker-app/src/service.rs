use task_tracker_core::{
    Status, Task, TaskFilter, TaskId, ValidationError, sanitize_description,
};
use task_tracker_store_json::StoreError;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::task_store::TaskStore;

/// Errors surfaced by [`TaskService`] operations.
///
/// A missing task is not an error; operations report it as `false` or `None`.
#[derive(Error, Debug)]
pub enum TaskServiceError {
    /// Caller-supplied data was rejected before the store was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backing store failed to read or write.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Every representable id has been handed out.
    #[error("no task ids left to assign")]
    IdsExhausted,
}

/// Service façade that encapsulates all task-related side effects.
///
/// Each call reloads the full collection, applies one change and saves it
/// back, so the store stays the single source of truth between calls.
pub struct TaskService<S> {
    store: S,
}

impl<S> TaskService<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: TaskStore> TaskService<S> {
    /// Create a `todo` task and return its id.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Validation`] for a blank description and
    /// [`TaskServiceError::Store`] if loading or saving fails.
    pub fn add(&self, description: &str) -> Result<TaskId, TaskServiceError> {
        let description = sanitize_description(description)?;
        let mut collection = self.store.load()?;
        let id = collection
            .insert_new(description, OffsetDateTime::now_utc())
            .ok_or(TaskServiceError::IdsExhausted)?;
        self.store.save(&collection)?;
        info!(%id, "Added task");
        Ok(id)
    }

    /// Replace a task's description. Returns `false` if the task does not exist.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Validation`] for a blank description and
    /// [`TaskServiceError::Store`] if loading or saving fails.
    pub fn update(&self, id: TaskId, description: &str) -> Result<bool, TaskServiceError> {
        let description = sanitize_description(description)?;
        self.modify(id, "update", |task, now| task.set_description(description, now))
    }

    /// Set a task's status. Any status may follow any other.
    /// Returns `false` if the task does not exist.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Store`] if loading or saving fails.
    pub fn set_status(&self, id: TaskId, status: Status) -> Result<bool, TaskServiceError> {
        self.modify(id, "set status", |task, now| task.set_status(status, now))
    }

    /// Remove a task. Returns `false` if the task does not exist.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Store`] if loading or saving fails.
    pub fn delete(&self, id: TaskId) -> Result<bool, TaskServiceError> {
        let mut collection = self.store.load()?;
        if collection.remove(id).is_none() {
            debug!(%id, "Task not found for delete");
            return Ok(false);
        }
        self.store.save(&collection)?;
        info!(%id, "Deleted task");
        Ok(true)
    }

    /// Tasks passing `filter`, in file order.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Store`] if the store cannot be read.
    pub fn find(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskServiceError> {
        let collection = self.store.load()?;
        let tasks: Vec<Task> = collection
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        debug!(%filter, matched = tasks.len(), total = collection.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Look up a single task.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Store`] if the store cannot be read.
    pub fn get(&self, id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.store.load()?.get(id).cloned())
    }

    fn modify<F>(&self, id: TaskId, action: &str, apply: F) -> Result<bool, TaskServiceError>
    where
        F: FnOnce(&mut Task, OffsetDateTime),
    {
        let mut collection = self.store.load()?;
        let Some(task) = collection.get_mut(id) else {
            debug!(%id, action, "Task not found");
            return Ok(false);
        };
        apply(task, OffsetDateTime::now_utc());
        self.store.save(&collection)?;
        info!(%id, action, "Modified task");
        Ok(true)
    }
}

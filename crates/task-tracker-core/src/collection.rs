use std::collections::HashSet;

use thiserror::Error;
use time::OffsetDateTime;

use crate::Task;
use crate::id::TaskId;

/// Reasons a stored set of tasks violates the collection invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Two records share the same id.
    #[error("duplicate task id {0}")]
    DuplicateId(TaskId),

    /// A record has a blank description.
    #[error("task {0} has an empty description")]
    BlankDescription(TaskId),

    /// A record was updated before it was created.
    #[error("task {0} has updatedAt earlier than createdAt")]
    UpdatedBeforeCreated(TaskId),
}

/// Every task held by the store, in file order, plus the id high-water mark.
///
/// `last_id` is the largest id ever handed out. It survives deletions, so ids
/// are never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollection {
    last_id: Option<TaskId>,
    tasks: Vec<Task>,
}

impl TaskCollection {
    /// Empty collection, as seen on first run.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_id: None,
            tasks: Vec::new(),
        }
    }

    /// Rebuild a collection from stored parts, checking invariants.
    ///
    /// A `last_id` lower than the largest stored id is raised to match it.
    ///
    /// # Errors
    /// Returns [`CollectionError`] when ids repeat, a description is blank, or
    /// timestamps are out of order.
    pub fn from_parts(last_id: Option<TaskId>, tasks: Vec<Task>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(CollectionError::DuplicateId(task.id));
            }
            if task.description.trim().is_empty() {
                return Err(CollectionError::BlankDescription(task.id));
            }
            if task.updated_at < task.created_at {
                return Err(CollectionError::UpdatedBeforeCreated(task.id));
            }
        }
        let highest = tasks.iter().map(|task| task.id).max();
        Ok(Self {
            last_id: last_id.max(highest),
            tasks,
        })
    }

    /// Largest id ever assigned, if any.
    #[must_use]
    pub const fn last_id(&self) -> Option<TaskId> {
        self.last_id
    }

    /// Tasks in file order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterate tasks in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Number of tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection holds no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Id the next created task will receive. `None` once ids are exhausted.
    #[must_use]
    pub fn next_id(&self) -> Option<TaskId> {
        self.last_id.map_or(Some(TaskId::FIRST), TaskId::next)
    }

    /// Append a fresh `todo` task and advance the high-water mark.
    ///
    /// Returns `None` without modifying the collection once ids are exhausted.
    pub fn insert_new(&mut self, description: String, now: OffsetDateTime) -> Option<TaskId> {
        let id = self.next_id()?;
        self.tasks.push(Task::new(id, description, now));
        self.last_id = Some(id);
        Some(id)
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Look up a task by id for mutation.
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Remove a task, keeping the order of the rest.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }
}

//! Storage seam used by [`TaskService`](crate::service::TaskService).

use task_tracker_core::TaskCollection;
use task_tracker_store_json::{JsonStore, StoreError};

/// Minimal storage abstraction required by the task service.
///
/// Implementations hand out the whole collection and take it back whole;
/// there are no partial updates.
pub trait TaskStore {
    /// Read every task. A store that was never written is empty.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing data cannot be read or parsed.
    fn load(&self) -> Result<TaskCollection, StoreError>;

    /// Replace the stored collection.
    ///
    /// # Errors
    /// Returns [`StoreError`] when persisting fails. Nothing is written in that case.
    fn save(&self, collection: &TaskCollection) -> Result<(), StoreError>;
}

impl TaskStore for JsonStore {
    fn load(&self) -> Result<TaskCollection, StoreError> {
        Self::load(self)
    }

    fn save(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        Self::save(self, collection)
    }
}

impl<T: TaskStore + ?Sized> TaskStore for &T {
    fn load(&self) -> Result<TaskCollection, StoreError> {
        (**self).load()
    }

    fn save(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        (**self).save(collection)
    }
}

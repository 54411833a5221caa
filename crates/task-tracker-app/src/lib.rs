//! Application layer for the task tracker.
//!
//! This crate provides the task service, the storage seam it runs on, and
//! project configuration shared by the command-line front end.

pub mod config;
pub mod service;
pub mod task_store;

// Re-exports for convenience
pub use config::{ProjectConfig, StoreConfig};
pub use service::{TaskService, TaskServiceError};
pub use task_store::TaskStore;

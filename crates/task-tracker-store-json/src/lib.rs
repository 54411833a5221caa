//! JSON file storage for the task tracker.
//!
//! The whole collection lives in one file. Every save rewrites it through a
//! temporary sibling file that is renamed over the target, so readers see
//! either the previous or the new content and never a partial write.

/// Store error types.
pub mod error;

pub use crate::error::StoreError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use task_tracker_core::{CollectionError, Task, TaskCollection, TaskId};
use tempfile::Builder;
use thiserror::Error;
use tracing::{debug, info};

/// On-disk document: `{ "lastId": n, "tasks": [...] }`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskDocument {
    #[serde(default)]
    last_id: Option<TaskId>,
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskDocumentRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    last_id: Option<TaskId>,
    tasks: &'a [Task],
}

impl<'a> From<&'a TaskCollection> for TaskDocumentRef<'a> {
    fn from(collection: &'a TaskCollection) -> Self {
        Self {
            last_id: collection.last_id(),
            tasks: collection.tasks(),
        }
    }
}

#[derive(Error, Debug)]
enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CollectionError),
}

/// Storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Store reading and writing `path`. Nothing is touched until the first call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection.
    ///
    /// A missing or whitespace-only file yields an empty collection.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Corrupt`] if its content is not a valid task file.
    pub fn load(&self) -> Result<TaskCollection, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Task file missing, starting empty");
                return Ok(TaskCollection::new());
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let collection = decode(&bytes).map_err(|err| StoreError::corrupt(&self.path, err))?;
        debug!(path = %self.path.display(), tasks = collection.len(), "Loaded tasks");
        Ok(collection)
    }

    /// Replace the file with the full collection.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the temporary file cannot be written or
    /// renamed into place. The previous file content is left intact.
    pub fn save(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        let mut body = serde_json::to_vec_pretty(&TaskDocumentRef::from(collection))?;
        body.push(b'\n');

        let dir = self.parent_dir();
        let mut tmp = Builder::new()
            .prefix(".tasks-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|err| StoreError::io(dir, err))?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|err| StoreError::io(tmp.path(), err))?;
        }
        tmp.write_all(&body)
            .map_err(|err| StoreError::io(tmp.path(), err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| StoreError::io(tmp.path(), err))?;
        tmp.persist(&self.path)
            .map_err(|err| StoreError::io(&self.path, err.error))?;
        // The rename is only durable once the directory entry is flushed.
        sync_dir(dir).map_err(|err| StoreError::io(dir, err))?;

        info!(path = %self.path.display(), tasks = collection.len(), "Saved tasks");
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn decode(bytes: &[u8]) -> Result<TaskCollection, DecodeError> {
    let Some(first) = bytes.iter().find(|byte| !byte.is_ascii_whitespace()) else {
        return Ok(TaskCollection::new());
    };

    // Older files hold a bare array of tasks with no high-water mark.
    let (last_id, tasks) = if *first == b'[' {
        let tasks: Vec<Task> = serde_json::from_slice(bytes)?;
        (None, tasks)
    } else {
        let document: TaskDocument = serde_json::from_slice(bytes)?;
        (document.last_id, document.tasks)
    };
    Ok(TaskCollection::from_parts(last_id, tasks)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use task_tracker_core::Status;
    use tempfile::TempDir;
    use time::macros::datetime;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("tasks.json"))
    }

    fn sample_collection() -> TaskCollection {
        let mut collection = TaskCollection::new();
        collection.insert_new("Buy groceries".into(), datetime!(2026-10-19 09:30 UTC));
        collection.insert_new("Cook dinner".into(), datetime!(2026-10-19 09:31 UTC));
        collection
    }

    #[test]
    fn missing_file_loads_empty_without_creating_it() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);

        let collection = store.load()?;
        assert!(collection.is_empty());
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn whitespace_only_file_loads_empty() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        fs::write(store.path(), " \n\t")?;

        assert!(store.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn save_and_load_roundtrip() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        let original = sample_collection();

        store.save(&original)?;
        let loaded = store.load()?;

        assert_eq!(loaded, original);
        assert_eq!(loaded.last_id().map(TaskId::get), Some(2));
        Ok(())
    }

    #[test]
    fn save_writes_camel_case_document() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        store.save(&sample_collection())?;

        let value: serde_json::Value = serde_json::from_slice(&fs::read(store.path())?)?;
        assert_eq!(value["lastId"], 2);
        assert_eq!(value["tasks"][0]["description"], "Buy groceries");
        assert_eq!(value["tasks"][0]["status"], "todo");
        assert_eq!(value["tasks"][1]["createdAt"], "2026-10-19T09:31:00Z");
        Ok(())
    }

    #[test]
    fn high_water_mark_survives_deleting_every_task() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        let mut collection = sample_collection();
        for id in [1, 2] {
            if let Some(id) = TaskId::new(id) {
                collection.remove(id);
            }
        }
        store.save(&collection)?;

        let loaded = store.load()?;
        assert!(loaded.is_empty());
        assert_eq!(loaded.next_id().map(TaskId::get), Some(3));
        Ok(())
    }

    #[test]
    fn malformed_json_is_corrupt() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        fs::write(store.path(), "{ \"tasks\": [ { \"id\": 1, ")?;

        let Err(err) = store.load() else {
            panic!("expected corrupt store error");
        };
        assert!(matches!(err, StoreError::Corrupt { .. }), "got {err:?}");
        Ok(())
    }

    #[test]
    fn unknown_status_is_corrupt() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"tasks":[{"id":1,"description":"x","status":"blocked","createdAt":"2026-10-19T09:30:00Z","updatedAt":"2026-10-19T09:30:00Z"}]}"#,
        )?;

        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
        Ok(())
    }

    #[test]
    fn duplicate_ids_are_corrupt() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        let record = r#"{"id":1,"description":"x","status":"todo","createdAt":"2026-10-19T09:30:00Z","updatedAt":"2026-10-19T09:30:00Z"}"#;
        fs::write(store.path(), format!("[{record},{record}]"))?;

        let Err(StoreError::Corrupt { reason, .. }) = store.load() else {
            panic!("expected corrupt store error");
        };
        assert!(reason.contains("duplicate task id 1"), "reason: {reason}");
        Ok(())
    }

    #[test]
    fn legacy_array_is_accepted() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"[{"id":4,"description":"legacy","status":"done","createdAt":"2026-10-19T09:30:00Z","updatedAt":"2026-10-19T10:00:00Z"}]"#,
        )?;

        let collection = store.load()?;
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.tasks()[0].status, Status::Done);
        assert_eq!(collection.next_id().map(TaskId::get), Some(5));
        Ok(())
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let store = JsonStore::new("/nonexistent-task-tracker-dir/tasks.json");
        let result = store.save(&sample_collection());
        assert!(matches!(result, Err(StoreError::Io { .. })), "got {result:?}");
    }

    #[test]
    fn save_leaves_no_temporary_files() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        store.save(&sample_collection())?;
        store.save(&TaskCollection::new())?;

        let names: Vec<_> = fs::read_dir(dir.path())?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<Result<_, _>>()?;
        assert_eq!(names, vec![std::ffi::OsString::from("tasks.json")]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn directory_sync_reports_missing_directory() -> Result<()> {
        let dir = TempDir::new()?;
        sync_dir(dir.path())?;

        let missing = dir.path().join("gone");
        let err = sync_dir(&missing).err().map(|err| err.kind());
        assert_eq!(err, Some(io::ErrorKind::NotFound));
        Ok(())
    }

    #[test]
    fn relative_path_without_directory_uses_current_dir() {
        let store = JsonStore::new("tasks.json");
        assert_eq!(store.parent_dir(), Path::new("."));
    }
}

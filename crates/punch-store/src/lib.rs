//! Storage layer for the punch time tracker.
//!
//! The whole [`WorkState`] is read and written as one JSON document per
//! invocation. There are no partial reads or appends.
//!
//! # Locking
//!
//! [`FileStore::open`] takes an exclusive advisory lock on a sibling
//! `<file>.lock` and holds it until the store is dropped, so concurrent
//! invocations serialize their load/dump cycles instead of racing.
//!
//! # Crash safety
//!
//! [`Store::dump`] writes to a temporary file in the same directory and
//! renames it over the target, so readers see either the old or the new
//! document, never a truncated one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use punch_core::{DecodeError, WorkState};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to lock {}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The persisted document is not a valid state.
    #[error("corrupt store at {}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Loads and persists the whole state.
pub trait Store {
    /// Reads the state; a store that was never written yields an empty state.
    fn load(&mut self) -> Result<WorkState, StoreError>;

    /// Replaces the persisted state.
    fn dump(&mut self, state: &WorkState) -> Result<(), StoreError>;
}

/// JSON document on disk, locked for the lifetime of the handle.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    _lock: File,
}

impl FileStore {
    /// Opens the store at `path`, creating its directory and taking the lock.
    ///
    /// Blocks while another process holds the lock.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let lock_path = lock_path(path);
        let lock = File::create(&lock_path).map_err(|source| StoreError::Lock {
            path: lock_path.clone(),
            source,
        })?;
        lock.lock_exclusive().map_err(|source| StoreError::Lock {
            path: lock_path,
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened store");

        Ok(Self {
            path: path.to_path_buf(),
            _lock: lock,
        })
    }
}

/// Returns the lock file path that guards `path`.
fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

impl Store for FileStore {
    fn load(&mut self) -> Result<WorkState, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no store yet, starting empty");
                return Ok(WorkState::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let state = WorkState::from_json(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(
            work = state.work().count(),
            interrupted = state.depth(),
            "loaded state"
        );
        Ok(state)
    }

    fn dump(&mut self, state: &WorkState) -> Result<(), StoreError> {
        let json = state.to_json()?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "dumped state");
        Ok(())
    }
}

/// Keeps the serialized document in memory. Useful for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<String>,
    dumps: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing serialized document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            dumps: 0,
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// How many times the state has been dumped.
    pub const fn dumps(&self) -> usize {
        self.dumps
    }
}

impl Store for MemoryStore {
    fn load(&mut self) -> Result<WorkState, StoreError> {
        match &self.document {
            None => Ok(WorkState::new()),
            Some(document) => {
                WorkState::from_json(document).map_err(|source| StoreError::Corrupt {
                    path: PathBuf::from("<memory>"),
                    source,
                })
            }
        }
    }

    fn dump(&mut self, state: &WorkState) -> Result<(), StoreError> {
        self.document = Some(state.to_json()?);
        self.dumps += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeDelta, TimeZone, Utc};

    fn sample_state() -> WorkState {
        let t0 = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
        let mut state = WorkState::new();
        state.start("code", t0).unwrap();
        state.tag(["deep"]).unwrap();
        state.interrupt("bug", t0 + TimeDelta::minutes(10)).unwrap();
        state.note("flaky test").unwrap();
        state
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(&temp.path().join("state.json")).unwrap();
        assert_eq!(store.load().unwrap(), WorkState::new());
    }

    #[test]
    fn open_creates_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested/dir/state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.dump(&WorkState::new()).unwrap();
        assert!(path.exists());
        assert!(temp.path().join("nested/dir/state.json.lock").exists());
    }

    #[test]
    fn dump_then_load_restores_state() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("state.json");
        let state = sample_state();

        let mut store = FileStore::open(&path).unwrap();
        store.dump(&state).unwrap();
        drop(store);

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn persisted_document_shape() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.dump(&sample_state()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["work"][0]["name"], "code");
        assert_eq!(value["work"][0]["end"], "2026-06-01T09:10:00.000000Z");
        assert_eq!(value["work"][1]["name"], "int: bug");
        assert_eq!(value["work"][1]["notes"], serde_json::json!(["flaky test"]));
        assert!(value["work"][1].get("end").is_none());
        assert_eq!(value["interrupt_stack"][0]["name"], "code");
        assert_eq!(value["interrupt_stack"][0]["tags"], serde_json::json!(["deep"]));
        assert_eq!(
            value["interrupt_stack"][0]["end"],
            "2026-06-01T09:10:00.000000Z"
        );
    }

    #[test]
    fn corrupt_file_is_reported_and_left_alone() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("state.json");
        fs::write(&path, "{\"work\": [").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("corrupt store"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"work\": [");
    }

    #[test]
    fn inconsistent_file_is_corrupt() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("state.json");
        fs::write(
            &path,
            r#"{"work": [], "interrupt_stack": [{"name": "a", "start": "2026-06-01T09:00:00Z"}]}"#,
        )
        .unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert!(matches!(
            store.load(),
            Err(StoreError::Corrupt {
                source: DecodeError::Inconsistent(_),
                ..
            })
        ));
    }

    #[test]
    fn dump_replaces_previous_document() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();

        store.dump(&sample_state()).unwrap();
        store.dump(&WorkState::new()).unwrap();

        assert_eq!(store.load().unwrap(), WorkState::new());
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 2, "only state and lock files: {leftovers:?}");
    }

    #[test]
    fn lock_path_sits_next_to_the_store() {
        assert_eq!(
            lock_path(Path::new("/data/punch/state.json")),
            PathBuf::from("/data/punch/state.json.lock")
        );
    }

    #[test]
    fn memory_store_round_trips_and_counts_dumps() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), WorkState::new());

        store.dump(&sample_state()).unwrap();
        assert_eq!(store.dumps(), 1);
        assert_eq!(store.load().unwrap(), sample_state());
        assert!(store.document().unwrap().contains("\"interrupt_stack\""));
    }

    #[test]
    fn memory_store_reports_corruption() {
        let mut store = MemoryStore::with_document("not json");
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }
}

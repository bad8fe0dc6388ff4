// --- File: crates/tutorlink_availability/src/storage.rs ---
//! The storage seam behind [`AvailabilityStore`](crate::store::AvailabilityStore).
//!
//! The store only ever needs one keyed record: the serialized weekly
//! pattern. This trait is the boundary where a networked, debounced
//! persistence layer would be introduced later; the store and projector
//! contracts do not change with the backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;
use tutorlink_config::AvailabilityConfig;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error reading or writing the underlying medium
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend cannot accept reads or writes at all (disabled, full)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable home for the single serialized weekly-pattern record.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleStorage: Send + Sync {
    /// Reads the persisted record. `Ok(None)` means nothing has been
    /// persisted yet, which is not an error.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Persists the record, overwriting any prior value.
    fn write(&self, payload: &str) -> Result<(), StorageError>;
}

// A shared backend can outlive several editing sessions.
impl<T: ScheduleStorage> ScheduleStorage for &T {
    fn read(&self) -> Result<Option<String>, StorageError> {
        (*self).read()
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        (*self).write(payload)
    }
}

/// File-backed storage: one JSON document at a configured path.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    /// Builds the storage at the path named by the availability config.
    pub fn from_config(config: &AvailabilityConfig) -> Self {
        JsonFileStorage::new(&config.schedule_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No schedule file at {}", self.path.display());
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral editing sessions.
#[derive(Default)]
pub struct InMemoryStorage {
    record: Mutex<Option<String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage::default()
    }
}

impl ScheduleStorage for InMemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match self.record.lock() {
            Ok(record) => Ok(record.clone()),
            Err(_) => Err(StorageError::Unavailable("poisoned record lock".into())),
        }
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        match self.record.lock() {
            Ok(mut record) => {
                *record = Some(payload.to_string());
                Ok(())
            }
            Err(_) => Err(StorageError::Unavailable("poisoned record lock".into())),
        }
    }
}

//! Persistent command storage abstraction.
//!
//! Startup commands and the autoexec flag are persisted by a key-value
//! collaborator that differs per platform (flash storage on the device, a
//! file on Linux). The server only sees the [`CommandStore`] trait; all
//! methods are synchronous so the trait stays usable on embedded targets.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

/// Errors that can occur when touching the persistent store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read from the backing store.
    #[error("failed to read storage: {0}")]
    Read(String),

    /// Failed to write to the backing store.
    #[error("failed to write storage: {0}")]
    Write(String),

    /// The backing store holds data that cannot be decoded.
    #[error("storage data is invalid: {0}")]
    InvalidData(String),
}

/// Abstract key-value storage for persisted configuration.
///
/// A missing key is not an error: `load` returns `Ok(None)`, and list
/// enumeration relies on that to find the end of the list.
pub trait CommandStore: Send + Sync {
    /// Load the value stored under `key`, or `None` if the key is absent.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, used by tests and as a stand-in when persistence is
/// not configured.
#[derive(Debug, Default)]
pub struct MemoryCommandStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryCommandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandStore for MemoryCommandStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let data = self
            .data
            .read()
            .map_err(|_| StorageError::Read("storage lock poisoned".to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StorageError::Write("storage lock poisoned".to_string()))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store holding a single JSON object of key-value pairs.
///
/// A missing file reads as an empty store, so first boot needs no setup
/// step. Every save rewrites the whole file; the data set is a handful of
/// short command lines, not a database.
#[derive(Debug)]
pub struct FileCommandStore {
    path: PathBuf,
}

impl FileCommandStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StorageError::InvalidData(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::Read(e.to_string())),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        let contents =
            serde_json::to_string_pretty(map).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| StorageError::Write(e.to_string()))
    }
}

impl CommandStore for FileCommandStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

//! Local key-value persistence
//!
//! The whole application state lives under four flat keys, each holding one
//! JSON value that is replaced wholesale on every write. The store is an
//! injected trait so services never touch the filesystem directly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{Error, Result};

/// Flat key namespace for persisted state
pub mod keys {
    pub const REPORTS: &str = "eodly_reports";
    pub const USERS: &str = "eodly_users";
    pub const SESSION: &str = "eodly_session";
    pub const THEME: &str = "eodly_theme";
}

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "EODLY_DATA_DIR";

/// Key-value storage area for JSON-serializable records
///
/// `load` never surfaces a parse failure: malformed content is logged and
/// reported as absent so callers substitute their empty default.
pub trait StorageArea: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>>;
    fn save(&self, key: &str, value: &Value) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// JsonFileStore
// ============================================================================

/// File-backed store: one `<key>.json` file per key under a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the store at the default data directory
    ///
    /// Resolution order: `EODLY_DATA_DIR`, then the platform data dir.
    pub fn open_default() -> Result<Self> {
        Self::new(Self::default_dir()?)
    }

    /// Resolve the default data directory without creating it
    pub fn default_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        dirs::data_dir()
            .map(|d| d.join("eodly"))
            .ok_or_else(|| Error::config("Could not resolve a data directory"))
    }

    /// The directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageArea for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!(
                    "[store] Discarding malformed value for key {} ({}): {}",
                    key,
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(self.path_for(key), contents)?;
        log::debug!("[store] Saved key {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageArea for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .lock()
            .map_err(|_| Error::internal("store mutex poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::internal("store mutex poisoned"))?;
        values.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::internal("store mutex poisoned"))?;
        values.remove(key);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

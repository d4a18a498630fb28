//! Key-value string storage backends
//!
//! The store only ever needs two things from persistence: read the raw
//! string in a named slot, and overwrite it. [`FileStorage`] keeps each
//! slot in its own file under a data directory; [`MemoryStorage`] keeps
//! slots in process memory.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TASKLET_DATA_DIR";

/// Directory name used under the platform data directory
pub const DEFAULT_DIR_NAME: &str = "tasklet";

/// Fallback data directory when the platform has none
pub const FALLBACK_DATA_DIR: &str = ".tasklet";

/// Contract between the task store and its persistence backend
pub trait KeyValueStorage {
    /// Read the raw value stored under `key`, or `None` if the slot is empty.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite the slot under `key` with `value`.
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// File-backed storage: one `<key>.json` file per slot
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory holding the slot files
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPath` if `dir` exists but is not a directory.
    /// Returns `StoreError::CreateDirectory` if directory creation fails.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        let dir = Self::prepare_path(dir)?;
        debug!("Opened file storage at {}", dir.display());
        Ok(Self { dir })
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Default data directory.
    ///
    /// Uses the platform data directory (`~/.local/share/tasklet` on Linux).
    /// Falls back to `.tasklet` relative to the current working directory
    /// when the platform reports none.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join(DEFAULT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }

    /// Resolve the data directory.
    ///
    /// Priority:
    /// 1. Explicit path (command line)
    /// 2. `TASKLET_DATA_DIR` environment variable (if non-empty)
    /// 3. [`FileStorage::default_path`]
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path;
        }

        if let Ok(env_path) = std::env::var(DATA_DIR_ENV)
            && !env_path.is_empty()
        {
            return PathBuf::from(env_path);
        }

        Self::default_path()
    }

    /// Validate the data directory path and create it if missing.
    fn prepare_path(path: &Path) -> StoreResult<PathBuf> {
        let path = path.to_path_buf();

        if path.exists() {
            if !path.is_dir() {
                return Err(StoreError::InvalidPath {
                    path,
                    reason: "not a directory".to_string(),
                });
            }
            return Ok(path);
        }

        fs::create_dir_all(&path).map_err(|e| StoreError::CreateDirectory {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }
}

// Ensure FileStorage is Send + Sync
static_assertions::assert_impl_all!(FileStorage: Send, Sync);

impl KeyValueStorage for FileStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => {
                debug!("Loaded {} bytes from {}", raw.len(), path.display());
                Ok(Some(raw))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored value at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.slot_path(key)?;
        // Write beside the slot and rename so readers never see a partial file
        let staging = self.dir.join(format!(".{}.json.tmp", key));

        fs::write(&staging, value).map_err(|e| StoreError::Io {
            path: staging.clone(),
            source: e,
        })?;
        fs::rename(&staging, &path).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e,
        })?;

        debug!("Saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Slot keys become file names, so keep them to a safe character set.
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidPath {
            path: PathBuf::from(key),
            reason: "storage key must be non-empty and use only [A-Za-z0-9_-]".to_string(),
        })
    }
}

/// In-memory storage
///
/// Useful for tests and for embedding the store where durability is not
/// wanted. Writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot pre-populated
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.slots.borrow_mut().insert(key.into(), value.into());
        storage
    }

    /// Make subsequent saves fail with `StoreError::WriteRejected`.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Current raw value under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.reject_writes.get() {
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
            });
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

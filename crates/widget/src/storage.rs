//! Local persistent key-value storage.
//!
//! Durable string storage keyed by name, modelled on browser local storage:
//! values survive restarts, total size is capped by a quota, and the store may
//! be empty or cleared at any time.
//!
//! Two backends:
//! - [`FileStore`] - one file per key inside a directory, written atomically
//! - [`MemoryStore`] - process-local, for tests and ephemeral sessions

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

const VALUE_EXTENSION: &str = "json";

/// Errors that can occur reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Writing the value would exceed the store's capacity.
    #[error("Storage quota exceeded: need {needed} bytes, quota is {quota}")]
    QuotaExceeded { needed: u64, quota: u64 },

    /// Keys are limited to ASCII letters, digits, `-` and `_`.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Durable string storage.
///
/// Implementations must be thread-safe (`Send + Sync`). Writes are
/// synchronous: once `set` returns, a later `get` observes the value.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::QuotaExceeded` if the store is full, or another
    /// `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Bytes a key/value pair counts against the quota.
fn entry_size(key: &str, value_len: u64) -> u64 {
    (key.len() as u64).saturating_add(value_len)
}

/// Check that `key` is usable by every backend.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` unless `key` is non-empty ASCII letters,
/// digits, `-` and `_`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Directory-backed store: each key is a `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: u64,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, quota_bytes: u64) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{VALUE_EXTENSION}"))
    }

    /// Bytes used by every key except `skip`.
    fn usage_excluding(&self, skip: &str) -> Result<u64, StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut used = 0_u64;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == skip {
                continue;
            }
            used = used.saturating_add(entry_size(stem, fs::metadata(&path)?.len()));
        }
        Ok(used)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        let needed = self
            .usage_excluding(key)?
            .saturating_add(entry_size(key, value.len() as u64));
        if needed > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                needed,
                quota: self.quota_bytes,
            });
        }

        fs::create_dir_all(&self.dir)?;

        // Write to a sibling temp file and rename so readers never see a
        // half-written value.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.{VALUE_EXTENSION}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<u64>,
}

impl MemoryStore {
    /// An unbounded, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store capped at `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            inner: Arc::new(MemoryStoreInner {
                entries: Mutex::default(),
                quota_bytes: Some(quota_bytes),
            }),
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries();

        if let Some(quota) = self.inner.quota_bytes {
            let others: u64 = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| entry_size(k, v.len() as u64))
                .sum();
            let needed = others.saturating_add(entry_size(key, value.len() as u64));
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries().remove(key);
        Ok(())
    }
}

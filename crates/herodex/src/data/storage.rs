//! Key-value storage for client-side persistence
//!
//! A small `localStorage`-style interface (string keys, string values) with an
//! in-memory backend and a file backend that keeps one JSON file per key.

use crate::config::app::NAME;
use crate::error::{HeroError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Get the application config directory path
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(NAME))
        .ok_or_else(|| HeroError::Config(
            "Could not determine config directory. HOME environment variable may not be set.".to_string()
        ))
}

// =============================================================================
// KeyValueStorage
// =============================================================================

/// String-keyed storage of serialized values
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Load and parse a JSON value stored under `key`
///
/// Returns `None` if the key is absent or holds only whitespace.
/// Returns an error if the value can't be parsed.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Result<Option<T>> {
    let content = match storage.get_item(key)? {
        Some(c) => c,
        None => return Ok(None),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let data = serde_json::from_str(&content).map_err(|e| {
        HeroError::Storage(format!("Failed to parse '{}': {}", key, e))
    })?;

    Ok(Some(data))
}

/// Serialize `data` to compact JSON and store it under `key`
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStorage, key: &str, data: &T) -> Result<()> {
    let content = serde_json::to_string(data).map_err(|e| {
        HeroError::Storage(format!("Failed to serialize '{}': {}", key, e))
    })?;
    storage.set_item(key, &content)
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// Storage that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with one entry
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().insert(key.into(), value.into());
        storage
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStorage
// =============================================================================

/// Storage backed by a directory, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use the default config directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(config_dir()?))
    }

    /// Use a specific directory (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        read_file(&self.path_for(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        create_dir_if_needed(&self.dir)?;
        write_file(&path, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        delete_at(&self.path_for(key)?)
    }
}

/// Keys become file names, so keep them to a safe alphabet
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(HeroError::Storage(format!("Invalid storage key '{}'", key)))
    }
}

// =============================================================================
// Path-based helpers
// =============================================================================

/// Create a directory if it doesn't exist, with proper error handling
fn create_dir_if_needed(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let msg = match e.kind() {
                ErrorKind::PermissionDenied => {
                    format!("Permission denied: cannot create directory {:?}", path)
                }
                _ => {
                    format!("Failed to create directory {:?}: {}", path, e)
                }
            };
            Err(HeroError::Storage(msg))
        }
    }
}

/// Read file contents with proper error handling
fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            ErrorKind::PermissionDenied => Err(HeroError::Storage(format!(
                "Permission denied: cannot read {:?}",
                path
            ))),
            _ => Err(HeroError::Storage(format!("Failed to read {:?}: {}", path, e))),
        },
    }
}

/// Write file contents with proper error handling
fn write_file(path: &Path, content: &str) -> Result<()> {
    match fs::write(path, content) {
        Ok(()) => Ok(()),
        Err(e) => {
            let msg = match e.kind() {
                ErrorKind::PermissionDenied => {
                    format!("Permission denied: cannot write to {:?}", path)
                }
                ErrorKind::ReadOnlyFilesystem => {
                    format!("Cannot write to {:?}: filesystem is read-only", path)
                }
                _ => {
                    format!("Failed to write to {:?}: {}", path, e)
                }
            };
            Err(HeroError::Storage(msg))
        }
    }
}

/// Delete a file, treating a missing file as success
fn delete_at(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(()),
            _ => Err(HeroError::Storage(format!("Failed to delete {:?}: {}", path, e))),
        },
    }
}

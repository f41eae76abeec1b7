//! Key/value storage seams.
//!
//! The original environment hands the guard two string stores: a persistent
//! one holding the Session Record and a tab-scoped one holding the
//! Return-Page Marker. Both have the same shape, so a single [`Storage`]
//! trait covers them and the guard is constructed with two instances.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};

/// Directory name for the default on-disk store location
const APP_NAME: &str = "brandklout-guard";

/// Synchronous string key/value store.
///
/// Reads and writes are synchronous and uncoordinated across processes, like
/// the browser storage they stand in for: two tabs renewing the same session
/// race with last-write-wins semantics.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store backed by a shared map.
///
/// Clones share the underlying map, so a harness can hand one clone to the
/// guard and inspect or seed the other. Single-threaded by design, matching
/// the page's one execution thread.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// On-disk store: one file per key under a directory.
///
/// For embedders without browser storage, e.g. a webview shell that wants
/// sessions to survive restarts.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Platform cache directory, e.g. `~/.cache/brandklout-guard`.
    pub fn default_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read storage key: {}", key))?;
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.key_path(key), value)
            .with_context(|| format!("Failed to write storage key: {}", key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove storage key: {}", key))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));

        a.remove("k").unwrap();
        assert_eq!(b.get("k").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_remove_missing_is_ok() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove("never-set").is_ok());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(storage.get("session").unwrap(), None);

        storage.set("session", r#"{"authenticated":true}"#).unwrap();
        assert_eq!(
            storage.get("session").unwrap().as_deref(),
            Some(r#"{"authenticated":true}"#)
        );

        storage.remove("session").unwrap();
        assert_eq!(storage.get("session").unwrap(), None);
        // Removing again is fine
        storage.remove("session").unwrap();
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        drop(storage);
    }
}

//! Key-value storage backends.
//!
//! The record store never touches the filesystem directly; it reads and
//! writes whole string values under a key, the same way a browser's local
//! storage is used. [`FileStorage`] keeps one file per key under a
//! directory, [`MemoryStorage`] keeps everything in a map.

use crate::error::{BriefingError, Result};
use crate::{io, paths};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at `<root>/storage`.
    pub fn under_root(root: &Path) -> Self {
        Self::new(paths::storage_dir(root))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry(&self, key: &str) -> Result<PathBuf> {
        paths::validate_storage_key(key)?;
        Ok(paths::storage_entry(&self.dir, key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        io::read_if_exists(&self.entry(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        io::atomic_write(&self.entry(key)?, value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        io::remove_if_exists(&self.entry(key)?)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage whose writes always fail, like a browser with its quota
    /// exhausted. Reads still work.
    pub fn read_only() -> Self {
        Self {
            entries: HashMap::new(),
            read_only: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(BriefingError::StorageUnavailable(
                "storage quota exceeded".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_storage_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path());

        assert!(storage.get("artifex_projects").unwrap().is_none());
        storage.set("artifex_projects", "[]").unwrap();
        assert_eq!(
            storage.get("artifex_projects").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("artifex_projects.json").exists());

        storage.remove("artifex_projects").unwrap();
        assert!(storage.get("artifex_projects").unwrap().is_none());
        // removing again is fine
        storage.remove("artifex_projects").unwrap();
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.set("../outside", "x"),
            Err(BriefingError::InvalidStorageKey(_))
        ));
    }

    #[test]
    fn memory_storage_read_only_rejects_writes() {
        let mut storage = MemoryStorage::read_only().with_entry("k", "v");
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        assert!(storage.set("k", "w").is_err());
        assert!(storage.remove("k").is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}

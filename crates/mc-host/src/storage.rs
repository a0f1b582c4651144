//! Key-value persistence for opaque progress blobs.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::HostResult;

/// A string-to-string store, the shape of browser local storage.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> HostResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> HostResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> HostResult<()>;
}

/// Volatile store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> HostResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> HostResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> HostResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> HostResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> HostResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> HostResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("masterclass.a.progress").unwrap(), None);
        store.set("masterclass.a.progress", "{}").unwrap();
        assert_eq!(store.get("masterclass.a.progress").unwrap().as_deref(), Some("{}"));
        store.set("masterclass.a.progress", "[]").unwrap();
        assert_eq!(store.get("masterclass.a.progress").unwrap().as_deref(), Some("[]"));
        store.remove("masterclass.a.progress").unwrap();
        store.remove("masterclass.a.progress").unwrap();
        assert_eq!(store.get("masterclass.a.progress").unwrap(), None);
    }

    #[test]
    fn memory_store_semantics() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn file_store_semantics() {
        let dir = tempfile::TempDir::new().unwrap();
        exercise(&mut FileStore::new(dir.path().join("nested")));
    }

    #[test]
    fn file_store_sanitizes_keys() {
        let store = FileStore::new("/tmp/store");
        assert_eq!(
            store.path_for("../evil key"),
            PathBuf::from("/tmp/store/.._evil_key.json")
        );
    }
}

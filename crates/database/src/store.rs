use crate::error::DbError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A string key/value store. Each key holds one serialized collection.
pub trait BlobStore {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, DbError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), DbError>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), DbError>;
}

/// Keeps everything in memory. Used by tests and one-off computations.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DbError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
///
/// Writes go to a temporary sibling first and are then renamed into place, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, DbError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "Opened file store.");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        let path = self.path_for(key);
        let staging = self.root.join(format!("{key}.json.tmp"));
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DbError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut impl BlobStore) {
        assert_eq!(store.get("pg_partners").unwrap(), None);

        store.put("pg_partners", "[]").unwrap();
        assert_eq!(store.get("pg_partners").unwrap().as_deref(), Some("[]"));

        store.put("pg_partners", "[{\"id\":\"1\"}]").unwrap();
        assert_eq!(store.get("pg_partners").unwrap().as_deref(), Some("[{\"id\":\"1\"}]"));

        store.remove("pg_partners").unwrap();
        assert_eq!(store.get("pg_partners").unwrap(), None);
        store.remove("pg_partners").unwrap();
    }

    #[test]
    fn memory_store_semantics() {
        let mut store = MemoryBlobStore::new();
        exercise(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_semantics() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::open(dir.path()).unwrap();
        exercise(&mut store);
    }

    #[test]
    fn file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::open(dir.path().join("data")).unwrap();
        store.put("pg_settings", "{}").unwrap();

        let path = dir.path().join("data").join("pg_settings.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
        assert!(!dir.path().join("data").join("pg_settings.json.tmp").exists());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileBlobStore::open(dir.path()).unwrap();
            store.put("pg_users", "[]").unwrap();
        }
        let store = FileBlobStore::open(dir.path()).unwrap();
        assert_eq!(store.get("pg_users").unwrap().as_deref(), Some("[]"));
    }
}

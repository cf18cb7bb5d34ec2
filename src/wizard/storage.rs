// ABOUTME: Draft persistence keyed by step, with a file-backed store for the app
// and an in-memory store for tests and dry runs

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access draft {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize draft {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Draft {key} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Draft store is unavailable: {0}")]
    Unavailable(String),
}

/// Key-value persistence for step drafts. Values are whole JSON documents.
#[cfg_attr(test, mockall::automock)]
pub trait DraftStore: Send {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save_raw(&mut self, key: &str, json: &str) -> Result<(), StorageError>;

    fn clear(&mut self, key: &str) -> Result<(), StorageError>;

    /// Where drafts live, for status output
    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// One `<key>.json` file per step under a directory
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl DraftStore for FileDraftStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Self::io_error(key, e))
    }

    fn save_raw(&mut self, key: &str, json: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;

        // Drafts are replaced whole: write beside the target, then rename
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| Self::io_error(key, e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| Self::io_error(key, e))?;
        tmp.persist(self.path_for(key))
            .map_err(|e| Self::io_error(key, e.error))?;

        debug!(key = %key, bytes = json.len(), "Draft written");
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| Self::io_error(key, e))?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Volatile store; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, json: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), json.to_string());
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl DraftStore for MemoryDraftStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save_raw(&mut self, key: &str, json: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileDraftStore::new(dir.path().join("drafts"));

        assert_eq!(store.load_raw("engagementPreferences").unwrap(), None);
        store.save_raw("engagementPreferences", r#"{"budgetRange":"25000-50000"}"#).unwrap();
        assert_eq!(
            store.load_raw("engagementPreferences").unwrap().as_deref(),
            Some(r#"{"budgetRange":"25000-50000"}"#)
        );
        assert!(store.path_for("engagementPreferences").exists());

        store.clear("engagementPreferences").unwrap();
        assert_eq!(store.load_raw("engagementPreferences").unwrap(), None);
        // Clearing twice is fine
        store.clear("engagementPreferences").unwrap();
    }

    #[test]
    fn test_file_store_overwrites_whole_document() {
        let dir = TempDir::new().unwrap();
        let mut store = FileDraftStore::new(dir.path());
        store.save_raw("k", r#"{"a":1,"b":2}"#).unwrap();
        store.save_raw("k", r#"{"a":3}"#).unwrap();
        assert_eq!(store.load_raw("k").unwrap().as_deref(), Some(r#"{"a":3}"#));
    }

    #[test]
    fn test_file_store_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let mut store = FileDraftStore::new(&blocker);
        let result = store.save_raw("k", "{}");
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryDraftStore::with_entry("a", "{}");
        assert_eq!(store.load_raw("a").unwrap().as_deref(), Some("{}"));
        store.clear("a").unwrap();
        assert_eq!(store.load_raw("a").unwrap(), None);
    }
}

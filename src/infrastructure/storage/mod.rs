//! Blob storage backends for the whisper history

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};

use crate::application::errors::StorageError;
use crate::domain::traits::BlobStore;

/// One JSON file per blob inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }
}

impl BlobStore for JsonFileStore {
    fn load(&self, name: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.blob_path(name)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, name: &str, blob: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base_path)?;
        let path = self.blob_path(name);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, blob)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Blobs kept in a SQLite table
pub struct SqliteBlobStore {
    conn: Mutex<Connection>,
}

impl SqliteBlobStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS blobs (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl BlobStore for SqliteBlobStore {
    fn load(&self, name: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let value = conn
            .query_row("SELECT value FROM blobs WHERE name = ?1", [name], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn save(&self, name: &str, blob: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO blobs (name, value, updated_at) VALUES (?1, ?2, datetime('now'))",
            rusqlite::params![name, blob],
        )?;
        Ok(())
    }
}

/// In-memory blobs; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, name: &str) -> Result<Option<String>, StorageError> {
        let blobs = self.blobs.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(blobs.get(name).cloned())
    }

    fn save(&self, name: &str, blob: &str) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().map_err(|_| StorageError::Poisoned)?;
        blobs.insert(name.to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        assert_eq!(store.load("whisperHistory").unwrap(), None);
        store.save("whisperHistory", "{}").unwrap();
        store.save("whisperHistory", r#"{"a-b":[]}"#).unwrap();
        assert_eq!(store.load("whisperHistory").unwrap().as_deref(), Some(r#"{"a-b":[]}"#));
        assert!(dir.path().join("nested").join("whisperHistory.json").exists());
    }

    #[test]
    fn test_sqlite_store_overwrites() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.load("whisperHistory").unwrap(), None);

        store.save("whisperHistory", "one").unwrap();
        store.save("whisperHistory", "two").unwrap();
        assert_eq!(store.load("whisperHistory").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_sqlite_store_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("whisperline.db");
        {
            let store = SqliteBlobStore::open(&path).unwrap();
            store.save("whisperHistory", "kept").unwrap();
        }
        let store = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(store.load("whisperHistory").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryBlobStore::new();
        let other = store.clone();
        store.save("k", "v").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("v"));
    }
}

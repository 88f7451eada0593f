//! Client session identity and its persistent storage.
//!
//! The session id is created once per client and reused for every request
//! so the backend can keep preference state between runs. It lives in a
//! small JSON key/value file in the platform data directory, the native
//! counterpart of browser local storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage key holding the session id
pub const SESSION_KEY: &str = "moodify_session_id";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not determine a data directory for local storage")]
    NoDataDir,
}

/// String key/value storage that survives restarts
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// JSON-file backed store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/moodify-client/local_storage.json`
    pub fn open_default() -> Result<Self, StorageError> {
        let base = directories::BaseDirs::new().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(
            base.data_dir()
                .join("moodify-client")
                .join("local_storage.json"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(&entries).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io_err)
    }
}

/// In-memory store that forgets everything on exit
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The client's session, owning its identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
}

impl Session {
    /// Reuse the stored session id, or create and persist a new one.
    pub fn load_or_create(store: &mut impl SessionStore) -> Result<Self, StorageError> {
        if let Some(id) = store.get(SESSION_KEY)? {
            let id = id.trim();
            if !id.is_empty() {
                tracing::debug!(session_id = %id, "reusing stored session");
                return Ok(Self { id: id.to_string() });
            }
        }

        let id = generate_session_id();
        store.set(SESSION_KEY, &id)?;
        tracing::info!(session_id = %id, "created new session");
        Ok(Self { id })
    }

    /// A session that is not persisted anywhere
    pub fn ephemeral() -> Self {
        Self {
            id: generate_session_id(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Random lowercase alphanumeric identifier
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_alphanumeric_and_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(a, a.to_lowercase());
    }

    #[test]
    fn test_session_created_once() {
        let mut store = MemoryStore::default();
        let first = Session::load_or_create(&mut store).unwrap();
        let second = Session::load_or_create(&mut store).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            store.get(SESSION_KEY).unwrap().as_deref(),
            Some(first.id())
        );
    }

    #[test]
    fn test_empty_stored_id_is_regenerated() {
        let mut store = MemoryStore::default();
        store.set(SESSION_KEY, "  ").unwrap();
        let session = Session::load_or_create(&mut store).unwrap();
        assert!(!session.id().is_empty());
        assert_eq!(store.get(SESSION_KEY).unwrap().unwrap(), session.id());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local_storage.json");

        let mut store = FileSessionStore::new(&path);
        let first = Session::load_or_create(&mut store).unwrap();
        assert!(path.exists());

        let mut reopened = FileSessionStore::new(&path);
        let second = Session::load_or_create(&mut reopened).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(dir.path().join("ls.json"));
        store.set("other", "value").unwrap();
        store.set(SESSION_KEY, "abc123").unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
        assert_eq!(store.get(SESSION_KEY).unwrap().as_deref(), Some("abc123"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileSessionStore::new(&path);
        assert!(matches!(
            store.get(SESSION_KEY),
            Err(StorageError::Json { .. })
        ));
    }
}

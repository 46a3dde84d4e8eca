use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use shared::domain::UserProfile;
use thiserror::Error;
use tracing::{debug, warn};

pub const USER_INFO_KEY: &str = "user_info";
pub const STORE_FILE_NAME: &str = "local_storage.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failure at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("storage payload is not valid json: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Synchronous string key-value storage, the desktop counterpart of browser
/// local storage. Last write wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All entries live in one JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn in_dir(data_dir: &Path) -> Result<Self, StorageError> {
        Self::open(data_dir.join(STORE_FILE_NAME))
    }

    /// Opens the store, creating parent directories. A missing file is an
    /// empty store; an unreadable one is reported and replaced on next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), "discarding unreadable local storage file: {err}");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StorageError::io(&path, err)),
        };

        debug!(path = %path.display(), entries = entries.len(), "opened local storage");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(&self.entries)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serialized).map_err(|err| StorageError::io(&staging, err))?;
        fs::rename(&staging, &self.path).map_err(|err| StorageError::io(&self.path, err))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// The onboarding profile persisted under [`USER_INFO_KEY`].
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// A corrupt or incomplete record reads as "no profile".
    pub fn load(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!("ignoring unreadable stored user profile: {err}");
                None
            }
        }
    }

    pub fn save(&mut self, profile: &UserProfile) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(profile)?;
        self.store.set(USER_INFO_KEY, serialized)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(USER_INFO_KEY)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::{PoisonError, RwLock},
};

use thiserror::Error;

use crate::config;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot access credential file: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key/value store the library reads its access token from.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

/// JSON-file backed store. Writes stay in memory until [`FileStore::persist`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: MemoryStore,
}

impl FileStore {
    /// Store at the default location in the local data directory.
    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(config::data_dir().join("config.json")).await
    }

    /// A missing file yields an empty store.
    pub async fn load_from(path: PathBuf) -> Result<Self, StoreError> {
        let values = MemoryStore::new();
        match async_fs::read_to_string(&path).await {
            Ok(content) => {
                let map: BTreeMap<String, String> = serde_json::from_str(&content)?;
                for (key, value) in map {
                    values.set(&key, &value);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(Self { path, values })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.values.snapshot())?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.values.set(key, value)
    }
}

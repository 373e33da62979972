use std::{collections::HashMap, path::PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// Key-value persistence surface backed by one JSON file in the local data
/// directory. Holds the token fields, the cached playlist listing and the
/// authenticated user id.
///
/// Mutations stay in memory until [`CacheStore::flush`] writes the whole
/// map back; a load is a point-in-time snapshot of the file.
pub struct CacheStore {
    path: PathBuf,
    values: HashMap<String, Value>,
}

impl CacheStore {
    /// Loads the store from the default location. A missing file yields an
    /// empty store; a corrupt one is an error.
    pub async fn load() -> Result<Self> {
        Self::load_from(Self::store_path()).await
    }

    /// Loads the store from an explicit path.
    pub async fn load_from(path: PathBuf) -> Result<Self> {
        let values = match async_fs::read_to_string(&path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| Error::Store(e.to_string()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(Error::Store(e.to_string())),
        };

        Ok(Self { path, values })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Writes the current map back to disk, creating parent directories as
    /// needed.
    pub async fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Store(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(&self.values).map_err(|e| Error::Store(e.to_string()))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    fn store_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("plsearch/cache/store.json");
        path
    }
}

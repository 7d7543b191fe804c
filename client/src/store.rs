use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use dashboard_common::{DashboardError, KeyValueStore};

// Key-value entries kept in one JSON object on disk. Every `set` rewrites
// the file before returning.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    fn write(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(&self.entries)?;
        std::fs::write(&self.path, payload)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write().map_err(|err| DashboardError::Storage {
            key: key.to_string(),
            message: err.to_string(),
        })
    }
}

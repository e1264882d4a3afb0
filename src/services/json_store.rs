//! Filesystem durable store: one JSON file per collection, written
//! atomically via a temp file and rename.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::PersistenceError;
use crate::ports::DurableStore;

/// Store rooted at a directory; collection `subjects` lives in
/// `<root>/subjects.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf, PersistenceError> {
        if collection.is_empty()
            || !collection.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PersistenceError::InvalidCollection(collection.to_string()));
        }
        Ok(self.root.join(format!("{collection}.json")))
    }
}

fn io_error(collection: &str, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io { collection: collection.to_string(), source }
}

impl DurableStore for JsonFileStore {
    fn load(&self, collection: &str) -> Result<Vec<Value>, PersistenceError> {
        let path = self.collection_path(collection)?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| io_error(collection, e))?;
        serde_json::from_str(&content).map_err(|source| PersistenceError::Serialization {
            collection: collection.to_string(),
            source,
        })
    }

    fn save(&self, collection: &str, records: &[Value]) -> Result<(), PersistenceError> {
        let path = self.collection_path(collection)?;
        fs::create_dir_all(&self.root).map_err(|e| io_error(collection, e))?;

        let json =
            serde_json::to_string_pretty(records).map_err(|source| {
                PersistenceError::Serialization { collection: collection.to_string(), source }
            })?;

        // Write to a sibling temp file, then rename over the target so a
        // failed write leaves the prior collection intact.
        let tmp = temp_path(&path, collection)?;
        fs::write(&tmp, json).map_err(|e| io_error(collection, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(collection, e))?;
        Ok(())
    }
}

fn temp_path(target: &Path, collection: &str) -> Result<PathBuf, PersistenceError> {
    let Some(parent) = target.parent() else {
        return Err(PersistenceError::InvalidCollection(collection.to_string()));
    };
    Ok(parent.join(format!("{collection}.json.tmp")))
}

//! In-memory durable store with save-failure injection.

use std::collections::BTreeMap;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use crate::domain::PersistenceError;
use crate::ports::DurableStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Value>>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Make every subsequent save fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    /// Raw records currently held for a collection.
    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .expect("collections lock")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

impl DurableStore for MemoryStore {
    fn load(&self, collection: &str) -> Result<Vec<Value>, PersistenceError> {
        Ok(self.records(collection))
    }

    fn save(&self, collection: &str, records: &[Value]) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io {
                collection: collection.to_string(),
                source: io::Error::other("injected save failure"),
            });
        }
        self.collections
            .lock()
            .expect("collections lock")
            .insert(collection.to_string(), records.to_vec());
        Ok(())
    }
}

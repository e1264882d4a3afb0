//! Durable key/value store port for registry collections.

use serde_json::Value;

use crate::domain::PersistenceError;

/// Ordered record persistence, one named collection per registry.
///
/// `load` of a collection that was never saved yields an empty sequence,
/// not an error. `save` must preserve insertion order, accept an empty
/// collection, and be atomic from the caller's perspective: either the new
/// full collection is durably persisted or the prior state remains intact.
pub trait DurableStore: Send + Sync + std::fmt::Debug {
    fn load(&self, collection: &str) -> Result<Vec<Value>, PersistenceError>;
    fn save(&self, collection: &str, records: &[Value]) -> Result<(), PersistenceError>;
}

//! Generic uniquely-keyed, ordered, store-backed collection, specialized
//! into the subject, style, template, and director-style registries.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::error::{PersistenceError, RegistryError};
use crate::domain::style::{DirectorStyle, Style};
use crate::domain::subject::Subject;
use crate::domain::template::Template;
use crate::ports::DurableStore;

/// Anything a registry can hold: cloneable, serializable, with a unique
/// string key (case-sensitive).
pub trait RegistryItem: Clone + Serialize + DeserializeOwned {
    fn key(&self) -> &str;
}

impl RegistryItem for Subject {
    fn key(&self) -> &str {
        &self.name
    }
}

impl RegistryItem for Style {
    fn key(&self) -> &str {
        &self.name
    }
}

impl RegistryItem for Template {
    fn key(&self) -> &str {
        &self.name
    }
}

impl RegistryItem for DirectorStyle {
    fn key(&self) -> &str {
        &self.name
    }
}

/// An insertion-ordered collection with enforced key uniqueness.
///
/// Every mutation is persisted synchronously to the durable store before the
/// in-memory change is committed; on a persistence failure the error
/// propagates and the registry's observable state is unchanged.
#[derive(Debug)]
pub struct Registry<T: RegistryItem> {
    collection: String,
    store: Arc<dyn DurableStore>,
    items: Vec<T>,
}

impl<T: RegistryItem> Registry<T> {
    /// Empty registry bound to a collection; nothing is written until the
    /// first mutation.
    pub fn new(collection: impl Into<String>, store: Arc<dyn DurableStore>) -> Self {
        Self { collection: collection.into(), store, items: Vec::new() }
    }

    /// Hydrate from the store. A missing collection yields an empty
    /// registry, not an error.
    pub fn load(
        collection: impl Into<String>,
        store: Arc<dyn DurableStore>,
    ) -> Result<Self, PersistenceError> {
        let collection = collection.into();
        let records = store.load(&collection)?;
        let items = records
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|source| PersistenceError::Serialization {
                collection: collection.clone(),
                source,
            })?;
        Ok(Self { collection, store, items })
    }

    /// All items, in insertion order.
    pub fn list(&self) -> &[T] {
        &self.items
    }

    /// Lookup by key. Never errors; absence is `None`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new item. Fails with `DuplicateKey` if the key exists.
    pub fn add(&mut self, item: T) -> Result<(), RegistryError> {
        if self.contains(item.key()) {
            return Err(RegistryError::DuplicateKey(item.key().to_string()));
        }
        let mut next = self.items.clone();
        next.push(item);
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }

    /// Replace the item with the same key, keeping its position.
    pub fn update(&mut self, item: T) -> Result<(), RegistryError> {
        let Some(position) = self.items.iter().position(|i| i.key() == item.key()) else {
            return Err(RegistryError::NotFound(item.key().to_string()));
        };
        let mut next = self.items.clone();
        next[position] = item;
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }

    /// Add or update, the "explicit save" used by styles and templates.
    pub fn upsert(&mut self, item: T) -> Result<(), RegistryError> {
        if self.contains(item.key()) { self.update(item) } else { self.add(item) }
    }

    /// Remove by key. Fails with `NotFound` if absent.
    pub fn remove(&mut self, key: &str) -> Result<(), RegistryError> {
        let Some(position) = self.items.iter().position(|i| i.key() == key) else {
            return Err(RegistryError::NotFound(key.to_string()));
        };
        let mut next = self.items.clone();
        next.remove(position);
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }

    fn persist(&self, items: &[T]) -> Result<(), PersistenceError> {
        let records = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| PersistenceError::Serialization {
                collection: self.collection.clone(),
                source,
            })?;
        self.store.save(&self.collection, &records)
    }
}

/// Subjects keyed by name, with activation toggling.
pub type SubjectRegistry = Registry<Subject>;

impl Registry<Subject> {
    /// Flip a subject's active flag in place (position preserved).
    pub fn set_active(&mut self, name: &str, active: bool) -> Result<(), RegistryError> {
        let mut subject =
            self.get(name).cloned().ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        subject.active = active;
        self.update(subject)
    }

    /// Value copies of the currently active subjects, in insertion order.
    pub fn active_subjects(&self) -> Vec<Subject> {
        self.list().iter().filter(|s| s.active).cloned().collect()
    }
}

/// Named prefix/suffix styles.
pub type StyleRegistry = Registry<Style>;

/// Named composition templates.
pub type TemplateRegistry = Registry<Template>;

/// Director-style profiles for script analysis.
pub type DirectorStyleRegistry = Registry<DirectorStyle>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subject::SubjectCategory;
    use crate::testing::MemoryStore;

    fn subject(name: &str) -> Subject {
        Subject::new(name, SubjectCategory::Object, "a thing")
    }

    fn registry(store: &Arc<MemoryStore>) -> SubjectRegistry {
        Registry::new("subjects", store.clone() as Arc<dyn DurableStore>)
    }

    #[test]
    fn add_then_get_and_list_in_insertion_order() {
        let store = Arc::new(MemoryStore::default());
        let mut subjects = registry(&store);

        subjects.add(subject("Maya")).unwrap();
        subjects.add(subject("Old Diner")).unwrap();

        assert!(subjects.get("Maya").is_some());
        assert!(subjects.get("maya").is_none()); // keys are case-sensitive
        let names: Vec<&str> = subjects.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Maya", "Old Diner"]);
    }

    #[test]
    fn duplicate_add_fails_and_leaves_registry_unchanged() {
        let store = Arc::new(MemoryStore::default());
        let mut subjects = registry(&store);
        subjects.add(subject("Maya")).unwrap();

        let mut duplicate = subject("Maya");
        duplicate.description = "someone else".to_string();
        let err = subjects.add(duplicate).unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateKey(ref key) if key == "Maya"));
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects.get("Maya").unwrap().description, "a thing");
    }

    #[test]
    fn update_missing_key_fails() {
        let store = Arc::new(MemoryStore::default());
        let mut subjects = registry(&store);
        let err = subjects.update(subject("Ghost")).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(ref key) if key == "Ghost"));
    }

    #[test]
    fn remove_missing_key_fails() {
        let store = Arc::new(MemoryStore::default());
        let mut subjects = registry(&store);
        let err = subjects.remove("Ghost").unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn mutations_persist_synchronously() {
        let store = Arc::new(MemoryStore::default());
        let mut subjects = registry(&store);
        subjects.add(subject("Maya")).unwrap();

        let reloaded: SubjectRegistry =
            Registry::load("subjects", store.clone() as Arc<dyn DurableStore>).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.list()[0].name, "Maya");
    }

    #[test]
    fn save_failure_propagates_and_rolls_back() {
        let store = Arc::new(MemoryStore::default());
        let mut subjects = registry(&store);
        subjects.add(subject("Maya")).unwrap();

        store.fail_saves(true);
        let err = subjects.add(subject("Old Diner")).unwrap_err();
        assert!(matches!(err, RegistryError::Persistence(_)));
        assert_eq!(subjects.len(), 1);

        store.fail_saves(false);
        let reloaded: SubjectRegistry =
            Registry::load("subjects", store as Arc<dyn DurableStore>).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn loading_a_missing_collection_yields_empty() {
        let store = Arc::new(MemoryStore::default());
        let subjects: SubjectRegistry =
            Registry::load("never-written", store as Arc<dyn DurableStore>).unwrap();
        assert!(subjects.is_empty());
    }

    #[test]
    fn set_active_toggles_in_place() {
        let store = Arc::new(MemoryStore::default());
        let mut subjects = registry(&store);
        subjects.add(subject("Maya")).unwrap();
        subjects.add(subject("Old Diner")).unwrap();

        subjects.set_active("Old Diner", true).unwrap();

        let active = subjects.active_subjects();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Old Diner");
        // Position preserved.
        assert_eq!(subjects.list()[1].name, "Old Diner");
    }

    #[test]
    fn upsert_adds_then_updates() {
        let store = Arc::new(MemoryStore::default());
        let mut styles: StyleRegistry = Registry::new("styles", store as Arc<dyn DurableStore>);

        styles.upsert(Style::new("Noir", "black and white")).unwrap();
        let mut updated = Style::new("Noir", "black and white, high contrast");
        updated.suffix = "hard shadows; venetian blinds; cigarette smoke".to_string();
        styles.upsert(updated).unwrap();

        assert_eq!(styles.len(), 1);
        assert!(styles.get("Noir").unwrap().suffix.contains("venetian"));
    }
}

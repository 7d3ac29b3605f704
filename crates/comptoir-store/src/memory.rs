//! In-memory store for tests and throwaway sessions.

use std::collections::HashMap;

use crate::error::{StoreError, StoreResult};
use crate::keys::StateKey;
use crate::store::KeyValueStore;

/// `HashMap`-backed [`KeyValueStore`].
///
/// ## Usage
/// ```rust
/// use comptoir_store::{KeyValueStore, MemoryStore, StateKey};
///
/// let mut store = MemoryStore::new();
/// store.save(StateKey::Sales, &Vec::<u32>::new()).unwrap();
/// assert_eq!(store.raw(StateKey::Sales), Some("[]"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<StateKey, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a record with raw JSON, valid or not.
    pub fn with_raw(mut self, key: StateKey, json: impl Into<String>) -> Self {
        self.records.insert(key, json.into());
        self
    }

    /// When set, every save fails with [`StoreError::Unavailable`].
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Raw JSON of a record, for assertions.
    pub fn raw(&self, key: StateKey) -> Option<&str> {
        self.records.get(&key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load_raw(&self, key: StateKey) -> StoreResult<Option<String>> {
        Ok(self.records.get(&key).cloned())
    }

    fn save_raw(&mut self, key: StateKey, json: &str) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::Unavailable(format!(
                "memory store is read-only, cannot save '{key}'"
            )));
        }
        self.records.insert(key, json.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_uses_default() {
        let store = MemoryStore::new();
        let value: Vec<String> = store.load_or_default(StateKey::Products, vec!["x".to_string()]);
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_corrupt_record_uses_default() {
        let store = MemoryStore::new().with_raw(StateKey::Sales, "{not json");
        let value: Vec<u32> = store.load_or_default(StateKey::Sales, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_wrong_shape_uses_default() {
        let store = MemoryStore::new().with_raw(StateKey::Sales, r#"{"a": 1}"#);
        let value: Vec<u32> = store.load_or_default(StateKey::Sales, vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        store.save(StateKey::Categories, &vec![1, 2, 3]).unwrap();
        let value: Vec<u32> = store.load_or_default(StateKey::Categories, Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_only_rejects_saves() {
        let mut store = MemoryStore::new();
        store.set_read_only(true);
        let result = store.save(StateKey::Settings, &"x");
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.raw(StateKey::Settings), None);
    }
}

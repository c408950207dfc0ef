//! In-memory record store used by tests in place of Postgres. Mirrors the
//! real store's ordering contract: prefix scans yield insertion order of
//! first writes, and an overwrite keeps the original position.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{RecordStore, StoreError};

#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            entries.push((key.to_string(), value));
        }
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(_, v)| v.clone())
            .collect())
    }
}

/// A store whose every call fails, for exercising outage paths.
#[derive(Clone, Default)]
pub struct FailingStore;

impl RecordStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get_by_prefix(&self, _prefix: &str) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_prefix_scan_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.set("p:a", json!(1)).await.unwrap();
        store.set("p:b", json!(2)).await.unwrap();
        store.set("q:c", json!(3)).await.unwrap();
        store.set("p:d", json!(4)).await.unwrap();

        let values = store.get_by_prefix("p:").await.unwrap();
        assert_eq!(values, vec![json!(1), json!(2), json!(4)]);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_original_position() {
        let store = MemoryStore::new();
        store.set("p:a", json!(1)).await.unwrap();
        store.set("p:b", json!(2)).await.unwrap();
        store.set("p:a", json!(10)).await.unwrap();

        let values = store.get_by_prefix("p:").await.unwrap();
        assert_eq!(values, vec![json!(10), json!(2)]);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }
}

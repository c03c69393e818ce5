//! In-memory key-value store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use readlater_core::{KeyValueStore, Namespace, Result};

/// Key-value namespace held in process memory.
///
/// Used by tests and by callers that want a throwaway session.
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<Namespace>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `slots`.
    pub fn with_slots(slots: Namespace) -> Self {
        Self {
            slots: RwLock::new(slots),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Namespace> {
        let slots = self.slots.read().await;
        Ok(keys
            .iter()
            .filter_map(|k| slots.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn get_all(&self) -> Result<Namespace> {
        Ok(self.slots.read().await.clone())
    }

    async fn set(&self, entries: Namespace) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots.extend(entries);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.slots.write().await.clear();
        Ok(())
    }

    async fn replace_all(&self, entries: Namespace) -> Result<()> {
        *self.slots.write().await = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ns(pairs: &[(&str, serde_json::Value)]) -> Namespace {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_get_omits_absent_slots() {
        let store = MemoryStore::with_slots(ns(&[("allTags", json!(["Must-read"]))]));
        let got = store.get(&["allTags", "readingList"]).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got["allTags"], json!(["Must-read"]));
    }

    #[tokio::test]
    async fn test_set_merges_slots() {
        let store = MemoryStore::with_slots(ns(&[("a", json!(1)), ("b", json!(2))]));
        store.set(ns(&[("b", json!(3)), ("c", json!(4))])).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all["a"], json!(1));
        assert_eq!(all["b"], json!(3));
        assert_eq!(all["c"], json!(4));
    }

    #[tokio::test]
    async fn test_replace_all_drops_missing_slots() {
        let store = MemoryStore::with_slots(ns(&[("a", json!(1))]));
        store.replace_all(ns(&[("b", json!(2))])).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert!(all.get("a").is_none());
        assert_eq!(all["b"], json!(2));
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryStore::with_slots(ns(&[("a", json!(1))]));
        store.clear().await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}

use crate::domain::ports::KeyValueStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory key-value store.
///
/// Uses `Arc<RwLock<HashMap<String, Vec<u8>>>>`; clones share the same map.
/// Nothing survives the process, which makes it the store of choice for tests
/// and for callers that do not want drafts on disk.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(key))
    }
}

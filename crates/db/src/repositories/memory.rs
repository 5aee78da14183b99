use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{KeyValueStore, RepositoryError};

/// Process-local store; contents are lost when the process exits.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, RepositoryError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryKeyValueStore;
    use crate::repositories::KeyValueStore;

    #[tokio::test]
    async fn set_get_remove() {
        let store = InMemoryKeyValueStore::new();

        assert_eq!(store.get("wishlist").await.expect("get"), None);

        store.set("wishlist", "[\"1\"]".to_string()).await.expect("set");
        store.set("wishlist", "[\"2\"]".to_string()).await.expect("overwrite");
        assert_eq!(store.get("wishlist").await.expect("get").as_deref(), Some("[\"2\"]"));

        assert!(store.remove("wishlist").await.expect("remove"));
        assert!(!store.remove("wishlist").await.expect("second remove"));
        assert_eq!(store.get("wishlist").await.expect("get"), None);
    }
}

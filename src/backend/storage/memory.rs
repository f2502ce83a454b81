//! In-memory storage backend

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::backend::storage::keys::validate_key;
use crate::backend::storage::{public_url_for, ObjectStorage, StorageError};

/// An object held by [`MemoryStorage`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Keeps every object in a shared map. Clones see the same objects.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    public_url: String,
}

impl MemoryStorage {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            objects: Arc::default(),
            public_url: public_url.into(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        let object = StoredObject {
            bytes,
            content_type: content_type.to_string(),
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(public_url_for(&self.public_url, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.objects.write().await.remove(key);
        Ok(())
    }
}

//! Storage doubles

use async_trait::async_trait;
use bytes::Bytes;

use corkboard::backend::storage::{MemoryStorage, ObjectStorage, StorageError};

/// Stores like [`MemoryStorage`] but refuses every delete
#[derive(Clone)]
pub struct FailingDeleteStorage {
    pub inner: MemoryStorage,
}

impl FailingDeleteStorage {
    pub fn new(public_url: &str) -> Self {
        Self {
            inner: MemoryStorage::new(public_url),
        }
    }
}

#[async_trait]
impl ObjectStorage for FailingDeleteStorage {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<String, StorageError> {
        self.inner.put(key, bytes, content_type).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected {
            operation: "delete",
            key: key.to_string(),
            status: 503,
        })
    }
}

/// Refuses every upload
pub struct FailingPutStorage;

#[async_trait]
impl ObjectStorage for FailingPutStorage {
    async fn put(&self, key: &str, _bytes: Bytes, _content_type: &str) -> Result<String, StorageError> {
        Err(StorageError::Rejected {
            operation: "put",
            key: key.to_string(),
            status: 500,
        })
    }

    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

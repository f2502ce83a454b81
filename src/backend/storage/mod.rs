//! Object Storage Gateway
//!
//! Uploaded images and board thumbnails are kept outside the database. The
//! server only ever needs two operations, so backends sit behind the narrow
//! [`ObjectStorage`] trait:
//!
//! - **`local`** - files on disk, served back under `/uploads`
//! - **`http`** - a plain HTTP object endpoint addressed as `{endpoint}/{bucket}/{key}`
//! - **`memory`** - a map, for tests and throwaway servers
//!
//! Keys are namespaced by purpose and board (see [`keys`]).

/// Key layout and URL to key mapping
pub mod keys;

/// Filesystem backend
pub mod local;

/// Plain HTTP object endpoint backend
pub mod http;

/// In-memory backend
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::backend::server::config::StorageConfig;

pub use http::HttpStorage;
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage backend rejected {operation} of '{key}' with status {status}")]
    Rejected {
        operation: &'static str,
        key: String,
        status: u16,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Blob store used by the upload gateway
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key` and return the public URL of the object.
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<String, StorageError>;

    /// Remove the object stored under `key`. Removing a missing object succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Build the backend selected by configuration.
pub fn build_storage(config: &StorageConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    let storage: Arc<dyn ObjectStorage> = match config {
        StorageConfig::Local { dir, public_url } => {
            tracing::info!(dir = %dir.display(), "Using local object storage");
            Arc::new(LocalStorage::new(dir.clone(), public_url.clone()))
        }
        StorageConfig::Http {
            endpoint,
            bucket,
            public_url,
            token,
        } => {
            tracing::info!(%endpoint, %bucket, "Using HTTP object storage");
            Arc::new(HttpStorage::new(
                endpoint.clone(),
                bucket.clone(),
                public_url.clone(),
                token.clone(),
            )?)
        }
        StorageConfig::Memory { public_url } => {
            tracing::warn!("Using in-memory object storage; uploads are lost on restart");
            Arc::new(MemoryStorage::new(public_url.clone()))
        }
    };
    Ok(storage)
}

/// Join a base URL and a key with exactly one slash between them.
pub(crate) fn public_url_for(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

//! Plain HTTP object endpoint backend
//!
//! Objects are written with `PUT {endpoint}/{bucket}/{key}` and removed with
//! `DELETE` on the same URL. When a token is configured it is sent as a
//! bearer credential; otherwise the endpoint must accept unauthenticated
//! writes (a presigning proxy, or a MinIO bucket with an open policy).
//!
//! Requests are not SigV4-signed, so AWS S3 itself will reject them.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::backend::storage::keys::validate_key;
use crate::backend::storage::{public_url_for, ObjectStorage, StorageError};

#[derive(Debug, Clone)]
pub struct HttpStorage {
    client: Client,
    endpoint: String,
    bucket: String,
    public_url: String,
    token: Option<String>,
}

impl HttpStorage {
    /// `public_url` defaults to `{endpoint}/{bucket}` when `None`.
    pub fn new(
        endpoint: String,
        bucket: String,
        public_url: Option<String>,
        token: Option<String>,
    ) -> Result<Self, StorageError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let public_url = public_url.unwrap_or_else(|| format!("{}/{}", endpoint, bucket));

        Ok(Self {
            client,
            endpoint,
            bucket,
            public_url,
            token,
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ObjectStorage for HttpStorage {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<String, StorageError> {
        validate_key(key)?;

        let request = self
            .client
            .put(self.object_url(key))
            .header(CONTENT_TYPE, content_type)
            .body(bytes);
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            return Err(StorageError::Rejected {
                operation: "put",
                key: key.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(public_url_for(&self.public_url, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        let request = self.client.delete(self.object_url(key));
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(StorageError::Rejected {
            operation: "delete",
            key: key.to_string(),
            status: status.as_u16(),
        })
    }
}

/**
 * Multipart File Extraction
 *
 * Uploads arrive as `multipart/form-data` with the file in a part named
 * `file`. Other parts are skipped.
 */

use axum::extract::Multipart;
use bytes::Bytes;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::storage::keys::file_extension;

/// Name of the form part carrying the upload
pub const FILE_FIELD: &str = "file";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// The `file` part of an upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Storage extension derived from the client-supplied file name.
    pub fn extension(&self) -> String {
        file_extension(self.file_name.as_deref())
    }
}

/// Pull the `file` part out of `multipart`.
///
/// # Errors
///
/// * `400 Bad Request` - no `file` part, or a malformed body
pub async fn read_file(mut multipart: Multipart) -> BackendResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = field.bytes().await?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(BackendError::invalid_input("Missing file"))
}

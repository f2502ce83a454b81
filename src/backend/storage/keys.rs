//! Storage key layout
//!
//! ```text
//! images/{board_id}/{uuid}{ext}    uploaded card images
//! thumbnails/{board_id}{ext}       one thumbnail per board
//! ```
//!
//! Stored URLs are the only record of where a blob lives, so cleanup
//! recovers the key by locating the namespace segment inside the URL.

use uuid::Uuid;

use crate::backend::storage::StorageError;
use crate::shared::BoardId;

pub const IMAGES_PREFIX: &str = "images/";
pub const THUMBNAILS_PREFIX: &str = "thumbnails/";

const DEFAULT_EXTENSION: &str = ".bin";

/// Lower-cased extension of an uploaded file name, dot included.
///
/// Missing or non-alphanumeric extensions fall back to `.bin`.
pub fn file_extension(file_name: Option<&str>) -> String {
    let extension = file_name
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name))
        .and_then(|name| name.rsplit_once('.'))
        .map(|(stem, ext)| (stem, ext.to_ascii_lowercase()))
        .filter(|(stem, ext)| {
            !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    match extension {
        Some((_, ext)) => format!(".{}", ext),
        None => DEFAULT_EXTENSION.to_string(),
    }
}

/// Fresh key for a card image on `board_id`.
pub fn image_key(board_id: BoardId, extension: &str) -> String {
    format!("{}{}/{}{}", IMAGES_PREFIX, board_id, Uuid::new_v4(), extension)
}

/// Key of the thumbnail of `board_id`.
pub fn thumbnail_key(board_id: BoardId, extension: &str) -> String {
    format!("{}{}{}", THUMBNAILS_PREFIX, board_id, extension)
}

/// Recover the storage key from a public URL.
///
/// Returns the suffix starting at the last `images/` or `thumbnails/`
/// segment, without any query string or fragment.
pub fn key_from_url(url: &str) -> Option<String> {
    let url = url.split(['?', '#']).next().unwrap_or(url);

    let start = [IMAGES_PREFIX, THUMBNAILS_PREFIX]
        .iter()
        .filter_map(|prefix| url.rfind(prefix))
        .max()?;

    let key = &url[start..];
    validate_key(key).ok()?;
    Some(key.to_string())
}

/// Reject keys that could escape the storage namespace.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let escapes = key
        .split(['/', '\\'])
        .any(|segment| segment == ".." || segment == ".");
    if key.is_empty() || key.starts_with('/') || escapes {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

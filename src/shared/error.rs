//! Shared Error Types
//!
//! Errors raised while validating request payloads before anything touches
//! the database. The backend maps every variant here to `400 Bad Request`.
//!
//! # Usage
//!
//! ```rust
//! use corkboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("image_url", "image_url is required for kind=image");
//! assert!(error.to_string().contains("image_url"));
//! ```
use thiserror::Error;

/// Payload validation errors shared by every resource type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// A field failed validation
    #[error("{message}")]
    ValidationError {
        /// The offending field
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field that failed, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

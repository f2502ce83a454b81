/**
 * Backend Error Types
 *
 * This module defines the error type returned by every request handler.
 * Each variant corresponds to one HTTP status so the mapping from failure
 * to response lives in a single place.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `InvalidInput` - malformed body or path segment (400)
 * - `Unauthenticated` - missing, invalid or expired session token (401)
 * - `Forbidden` - valid identity or share token, insufficient permission (403)
 * - `NotFound` - the resource does not exist where the path says it is (404)
 * - `MethodNotAllowed` - the path exists but not for this method (405)
 *
 * ## Server Errors
 *
 * `Internal`, `Database` and `Storage` all become 500. Their details are
 * logged; the client only sees a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::storage::StorageError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use corkboard::backend::error::BackendError;
///
/// let err = BackendError::not_found("card not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed request body, query or path segment
    #[error("{message}")]
    InvalidInput { message: String },

    /// No usable identity on a route that requires one
    #[error("{message}")]
    Unauthenticated { message: String },

    /// Identity is known but lacks the required permission, or the share
    /// link is unknown
    #[error("{message}")]
    Forbidden { message: String },

    /// Resource does not exist (or not under the board the request implies)
    #[error("{message}")]
    NotFound { message: String },

    /// Known path, unsupported method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Any other server-side failure
    #[error("{message}")]
    Internal { message: String },

    /// Relational store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Object storage failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Payload validation failure
    #[error(transparent)]
    Shared(#[from] SharedError),
}

/// Result alias used throughout the backend
pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `InvalidInput`, `Shared` - 400 Bad Request
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `MethodNotAllowed` - 405 Method Not Allowed
    /// - `Internal`, `Database`, `Storage` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } | Self::Shared(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal { .. } | Self::Database(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the client.
    ///
    /// Server-side failures are reduced to a generic message.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() {
            return "Internal server error".to_string();
        }
        self.to_string()
    }
}

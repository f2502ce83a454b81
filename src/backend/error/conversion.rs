/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, plus conversions from the axum
 * extractor rejections the dispatcher runs into while reading bodies.
 *
 * # Response Format
 *
 * ```json
 * { "error": "Error message" }
 * ```
 */

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = serde_json::json!({ "error": self.message() });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::invalid_input(rejection.body_text())
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        BackendError::invalid_input(rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(error: MultipartError) -> Self {
        BackendError::invalid_input(format!("Invalid multipart body: {}", error.body_text()))
    }
}

/**
 * Signup Handler
 *
 * `POST /signup` creates an account and logs it in straight away.
 */

use axum::Json;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::users::register;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// Signup handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed email, empty password, email already registered
/// * `500 Internal Server Error` - hashing, database or token failure
///
/// # Example Request
///
/// ```http
/// POST /signup HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "ann@example.com", "password": "hunter2" }
/// ```
pub async fn signup(state: &AppState, request: SignupRequest) -> BackendResult<Json<AuthResponse>> {
    let user = register(
        &state.db,
        &request.email,
        &request.password,
        state.config.bcrypt_cost,
    )
    .await?;

    let token = state.sessions.issue(user.id).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("failed to create session")
    })?;

    tracing::info!("User signed up: {} ({})", user.email, user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

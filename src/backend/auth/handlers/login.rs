/**
 * Login Handler
 *
 * `POST /login` exchanges an email and password for a session token.
 *
 * # Security
 *
 * - Unknown email and wrong password both return 401 `invalid credentials`
 * - Password verification is constant-time (bcrypt)
 * - Passwords are never logged or returned
 */

use axum::Json;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::verify_credentials;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

pub async fn login(state: &AppState, request: LoginRequest) -> BackendResult<Json<AuthResponse>> {
    let user = verify_credentials(&state.db, &request.email, &request.password).await?;

    let token = state.sessions.issue(user.id).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("failed to create session")
    })?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

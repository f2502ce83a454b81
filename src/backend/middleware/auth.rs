/**
 * Authentication
 *
 * Turns the `Authorization: Bearer <token>` header into an
 * `AuthenticatedUser`. The dispatcher calls `authenticate` for every route
 * that needs a signed-in user and passes the result explicitly to the
 * handler.
 */

use axum::http::{header::AUTHORIZATION, HeaderMap};
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::shared::UserId;

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// The token part of a `Bearer` authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the caller of a request.
///
/// Returns 401 if the header is missing or malformed, the token is invalid
/// or expired, or the user it names no longer exists.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> BackendResult<AuthenticatedUser> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::debug!("Missing or malformed Authorization header");
        BackendError::unauthenticated("Unauthorized")
    })?;

    let user_id = state.sessions.validate(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthenticated("Unauthorized")
    })?;

    let email = verify_user_exists(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for unknown user {}", user_id);
            BackendError::unauthenticated("Unauthorized")
        })?;

    Ok(AuthenticatedUser { user_id, email })
}

/// The email of `user_id`, or `None` when the account is gone.
async fn verify_user_exists(pool: &SqlitePool, user_id: UserId) -> Result<Option<String>, sqlx::Error> {
    Ok(get_user_by_id(pool, user_id).await?.map(|user| user.email))
}

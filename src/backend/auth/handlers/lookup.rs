/**
 * User Lookup Handler
 *
 * `GET /users/lookup?email=` turns an email into a user id so an owner can
 * grant access to a collaborator they only know by address.
 */

use axum::Json;

use crate::backend::auth::handlers::types::{LookupQuery, UserResponse};
use crate::backend::auth::users::{get_user_by_email, normalize_email};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// # Errors
///
/// * `400 Bad Request` - missing or malformed email
/// * `404 Not Found` - no account with that email
pub async fn lookup_user(state: &AppState, query: LookupQuery) -> BackendResult<Json<UserResponse>> {
    let email = normalize_email(&query.email)?;

    let user = get_user_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| BackendError::not_found("user not found"))?;

    Ok(Json(user.into()))
}

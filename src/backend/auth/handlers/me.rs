/**
 * Current User Handler
 *
 * `GET /me` echoes the identity behind the session token.
 */

use axum::Json;

use crate::backend::auth::handlers::types::MeResponse;
use crate::backend::error::BackendResult;
use crate::backend::middleware::auth::AuthenticatedUser;

pub async fn get_me(user: &AuthenticatedUser) -> BackendResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        user_id: user.user_id,
        email: user.email.clone(),
    }))
}

/**
 * Access Grant Handlers
 *
 * `/boards/{id}/access`, owner only.
 */

use axum::Json;

use crate::backend::access::db;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::boards::db::get_board;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::permissions::{authorize, Principal};
use crate::backend::server::state::AppState;
use crate::shared::access::{AccessGrant, GrantAccessRequest, RevokeAccessRequest};
use crate::shared::{BoardId, Requirement, Scope, StatusResponse};

async fn require_owner(state: &AppState, user: &AuthenticatedUser, board_id: BoardId) -> BackendResult<()> {
    authorize(&state.db, &Principal::User(user.user_id), board_id, Requirement::Owner).await?;
    Ok(())
}

/// `GET /boards/{id}/access`
pub async fn list_access(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
) -> BackendResult<Json<Vec<AccessGrant>>> {
    require_owner(state, user, board_id).await?;
    Ok(Json(db::list_grants(&state.db, board_id).await?))
}

/// `POST /boards/{id}/access`
///
/// # Errors
///
/// * `400 Bad Request` - permission other than read/edit, or target is the owner
/// * `404 Not Found` - target user does not exist
pub async fn grant_access(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
    request: GrantAccessRequest,
) -> BackendResult<Json<StatusResponse>> {
    require_owner(state, user, board_id).await?;
    let scope: Scope = request.permission.parse()?;

    if get_user_by_id(&state.db, request.user_id).await?.is_none() {
        return Err(BackendError::not_found("user not found"));
    }

    let board = get_board(&state.db, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found("board not found"))?;
    if board.owner_id == request.user_id {
        return Err(BackendError::invalid_input("the board owner already has full access"));
    }

    db::upsert_grant(&state.db, board_id, request.user_id, scope).await?;

    tracing::info!(board_id, user_id = request.user_id, %scope, "Access granted");
    Ok(Json(StatusResponse::new("granted")))
}

/// `DELETE /boards/{id}/access`
pub async fn revoke_access(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
    request: RevokeAccessRequest,
) -> BackendResult<Json<StatusResponse>> {
    require_owner(state, user, board_id).await?;

    if !db::revoke_grant(&state.db, board_id, request.user_id).await? {
        return Err(BackendError::not_found("No access entry found"));
    }

    tracing::info!(board_id, user_id = request.user_id, "Access revoked");
    Ok(Json(StatusResponse::new("revoked")))
}

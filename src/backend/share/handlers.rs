/**
 * Share Link Handlers
 *
 * Management (`/boards/{id}/share`) is owner only. The anonymous surface
 * (`/share/{token}...`, `/permission/{token}`) identifies the caller by the
 * token alone.
 */

use axum::Json;

use crate::backend::auth::users::is_unique_violation;
use crate::backend::boards::handlers::load_detail;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::permissions::{authorize, resolve_share_token, token_permission, Principal};
use crate::backend::server::state::AppState;
use crate::backend::share::db;
use crate::shared::board::BoardDetail;
use crate::shared::share::{CreateShareRequest, PermissionResponse, RevokeShareRequest, ShareToken};
use crate::shared::{BoardId, Permission, Requirement, Scope, StatusResponse};

pub const INVALID_SHARE_LINK: &str = "invalid or expired share link";

async fn require_owner(state: &AppState, user: &AuthenticatedUser, board_id: BoardId) -> BackendResult<()> {
    authorize(&state.db, &Principal::User(user.user_id), board_id, Requirement::Owner).await?;
    Ok(())
}

/// `GET /boards/{id}/share`
pub async fn list_shares(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
) -> BackendResult<Json<Vec<ShareToken>>> {
    require_owner(state, user, board_id).await?;
    Ok(Json(db::list_shares(&state.db, board_id).await?))
}

/// `POST /boards/{id}/share`
///
/// # Errors
///
/// * `400 Bad Request` - permission other than read/edit
/// * `500 Internal Server Error` - token collision or store failure
pub async fn create_share(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
    request: CreateShareRequest,
) -> BackendResult<Json<ShareToken>> {
    require_owner(state, user, board_id).await?;
    let scope: Scope = request.permission.parse()?;

    let share = db::insert_share(&state.db, board_id, &db::generate_token(), scope)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::internal("share token collision")
            } else {
                e.into()
            }
        })?;

    tracing::info!(board_id, share_id = share.id, %scope, "Share link created");
    Ok(Json(share))
}

/// `DELETE /boards/{id}/share`
pub async fn revoke_share(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
    request: RevokeShareRequest,
) -> BackendResult<Json<StatusResponse>> {
    require_owner(state, user, board_id).await?;

    if !db::delete_share(&state.db, board_id, request.share_id).await? {
        return Err(BackendError::not_found("share link not found"));
    }

    tracing::info!(board_id, share_id = request.share_id, "Share link revoked");
    Ok(Json(StatusResponse::new("deleted")))
}

/// Board a share token is bound to, with the permission it carries.
///
/// Unknown and revoked tokens are `403`.
pub async fn share_board(state: &AppState, token: &str) -> BackendResult<(BoardId, Permission)> {
    resolve_share_token(&state.db, token)
        .await?
        .map(|(board_id, scope)| (board_id, scope.into()))
        .ok_or_else(|| BackendError::forbidden(INVALID_SHARE_LINK))
}

/// `GET /share/{token}`, once [`share_board`] has resolved the token.
pub async fn share_detail(
    state: &AppState,
    board_id: BoardId,
    permission: Permission,
) -> BackendResult<Json<BoardDetail>> {
    load_detail(state, board_id, permission).await.map(Json)
}

/// `GET /permission/{token}`: public, never fails for an unknown token.
pub async fn permission_lookup(state: &AppState, token: &str) -> BackendResult<Json<PermissionResponse>> {
    let permission = token_permission(&state.db, token).await?;
    Ok(Json(PermissionResponse { permission }))
}

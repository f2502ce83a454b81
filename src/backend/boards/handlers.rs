/**
 * Board Handlers
 *
 * # Permissions
 *
 * - list / create: any signed-in user (scoped to themselves)
 * - detail: `read`
 * - rename / delete: `owner`
 */

use axum::Json;

use crate::backend::boards::db;
use crate::backend::cards::{db as cards_db, handlers::remove_blob};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::permissions::{authorize, Principal};
use crate::backend::server::state::AppState;
use crate::shared::board::{normalize_title, Board, BoardDetail, BoardSummary, CreateBoardRequest};
use crate::shared::{BoardId, Permission, Requirement, StatusResponse};

/// `GET /boards`
pub async fn list_boards(state: &AppState, user: &AuthenticatedUser) -> BackendResult<Json<Vec<BoardSummary>>> {
    Ok(Json(db::list_boards_for_user(&state.db, user.user_id).await?))
}

/// `POST /boards`
pub async fn create_board(
    state: &AppState,
    user: &AuthenticatedUser,
    request: CreateBoardRequest,
) -> BackendResult<Json<Board>> {
    let title = normalize_title(&request.title)?;
    let board = db::create_board(&state.db, user.user_id, &title).await?;

    tracing::info!(board_id = board.id, owner_id = user.user_id, "Board created");
    Ok(Json(board))
}

/// `GET /boards/{id}`: metadata, the caller's permission and every card.
pub async fn board_detail(
    state: &AppState,
    principal: &Principal,
    board_id: BoardId,
) -> BackendResult<Json<BoardDetail>> {
    let permission = authorize(&state.db, principal, board_id, Requirement::Read).await?;
    load_detail(state, board_id, permission).await.map(Json)
}

/// Board detail for a caller whose permission is already known.
pub(crate) async fn load_detail(
    state: &AppState,
    board_id: BoardId,
    permission: Permission,
) -> BackendResult<BoardDetail> {
    let board = db::get_board(&state.db, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found("board not found"))?;
    let cards = cards_db::list_cards(&state.db, board_id).await?;

    Ok(BoardDetail::new(board, permission, cards))
}

/// `PUT /boards/{id}` and legacy `PUT /boards`
pub async fn rename_board(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
    title: &str,
) -> BackendResult<Json<StatusResponse>> {
    authorize(&state.db, &Principal::User(user.user_id), board_id, Requirement::Owner).await?;
    let title = normalize_title(title)?;

    if !db::rename_board(&state.db, board_id, &title).await? {
        return Err(BackendError::not_found("board not found"));
    }

    Ok(Json(StatusResponse::new("updated")))
}

/// `DELETE /boards/{id}` and legacy `DELETE /boards`
///
/// Cards, grants and share links go with the board through the schema's
/// cascades. Image and thumbnail blobs are then removed on a best-effort
/// basis, like single-card deletion.
pub async fn delete_board(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
) -> BackendResult<Json<StatusResponse>> {
    authorize(&state.db, &Principal::User(user.user_id), board_id, Requirement::Owner).await?;

    let mut blobs = cards_db::list_image_urls(&state.db, board_id).await?;
    if let Some(board) = db::get_board(&state.db, board_id).await? {
        blobs.extend(board.thumbnail_url);
    }

    if !db::delete_board(&state.db, board_id).await? {
        return Err(BackendError::not_found("board not found"));
    }

    for url in &blobs {
        remove_blob(state, url).await;
    }

    tracing::info!(board_id, blobs = blobs.len(), "Board deleted");
    Ok(Json(StatusResponse::new("deleted")))
}

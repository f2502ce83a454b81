/**
 * Card Handlers
 *
 * Card operations are reachable from two places: the signed-in routes
 * (`/boards/{id}/cards`, `/cards/{id}`) and the share-link routes
 * (`/share/{token}/cards[/{id}]`). Both go through the functions below; the
 * only difference is the `Principal` and, for share links, the board the
 * card must belong to.
 *
 * # Deletion
 *
 * The row is deleted first. For image cards the blob is then removed on a
 * best-effort basis: a storage failure is logged and the request still
 * succeeds.
 */

use axum::Json;

use crate::backend::cards::db;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::permissions::{authorize, Principal};
use crate::backend::server::state::AppState;
use crate::backend::storage::keys::key_from_url;
use crate::shared::card::{Card, CreateCardRequest, UpdateCardRequest};
use crate::shared::{BoardId, CardId, Requirement, StatusResponse};

/// `GET .../cards`
pub async fn list_cards(
    state: &AppState,
    principal: &Principal,
    board_id: BoardId,
) -> BackendResult<Json<Vec<Card>>> {
    authorize(&state.db, principal, board_id, Requirement::Read).await?;
    Ok(Json(db::list_cards(&state.db, board_id).await?))
}

/// `POST .../cards`
///
/// # Errors
///
/// * `403 Forbidden` - principal lacks `edit`
/// * `400 Bad Request` - unknown kind, image card without `image_url`
pub async fn create_card(
    state: &AppState,
    principal: &Principal,
    board_id: BoardId,
    request: CreateCardRequest,
) -> BackendResult<Json<Card>> {
    authorize(&state.db, principal, board_id, Requirement::Edit).await?;

    let new_card = request.validate()?;
    let card = db::insert_card(&state.db, board_id, &new_card).await?;

    tracing::info!(card_id = card.id, board_id, kind = card.kind().as_str(), "Card created");
    Ok(Json(card))
}

/// `PUT /cards/{id}` and `PUT /share/{token}/cards/{id}`
///
/// Omitted fields keep their stored values. An update that changes nothing
/// is not written, so `updated_at` is left alone too.
pub async fn update_card(
    state: &AppState,
    principal: &Principal,
    expected_board: Option<BoardId>,
    card_id: CardId,
    request: UpdateCardRequest,
) -> BackendResult<Json<StatusResponse>> {
    let current = find_card(state, expected_board, card_id).await?;
    authorize(&state.db, principal, current.board_id, Requirement::Edit).await?;

    let updated = request.apply_to(&current)?;
    if updated != current && !db::update_card(&state.db, &updated).await? {
        return Err(BackendError::not_found("card not found"));
    }

    Ok(Json(StatusResponse::new("updated")))
}

/// `DELETE /cards/{id}` and `DELETE /share/{token}/cards/{id}`
pub async fn delete_card(
    state: &AppState,
    principal: &Principal,
    expected_board: Option<BoardId>,
    card_id: CardId,
) -> BackendResult<Json<StatusResponse>> {
    let card = find_card(state, expected_board, card_id).await?;
    authorize(&state.db, principal, card.board_id, Requirement::Edit).await?;

    if !db::delete_card(&state.db, card.id, card.board_id).await? {
        return Err(BackendError::not_found("card not found"));
    }

    if let Some(url) = card.content.image_url() {
        remove_blob(state, url).await;
    }

    tracing::info!(card_id, board_id = card.board_id, "Card deleted");
    Ok(Json(StatusResponse::new("deleted")))
}

/// Look a card up, treating "on another board" the same as "missing".
async fn find_card(
    state: &AppState,
    expected_board: Option<BoardId>,
    card_id: CardId,
) -> BackendResult<Card> {
    db::get_card(&state.db, card_id)
        .await?
        .filter(|card| expected_board.map_or(true, |board_id| card.board_id == board_id))
        .ok_or_else(|| BackendError::not_found("card not found"))
}

/// Best-effort removal of the blob behind `url`. Never fails the caller.
pub(crate) async fn remove_blob(state: &AppState, url: &str) {
    let Some(key) = key_from_url(url) else {
        tracing::warn!(%url, "Could not derive a storage key from image URL; blob left in place");
        return;
    };

    if let Err(e) = state.storage.delete(&key).await {
        tracing::warn!(%key, error = %e, "Failed to delete blob; continuing");
    }
}

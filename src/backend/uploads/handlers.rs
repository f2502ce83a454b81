/**
 * Upload Handlers
 *
 * # Endpoints
 *
 * - `POST /boards/{id}/images`, `POST /share/{token}/images` - store a card
 *   image and return its URL. No card is created; the client attaches the
 *   URL with a separate card create. Requires `edit`.
 * - `POST /boards/{id}/thumbnail` - store and attach the board thumbnail.
 *   Owner only.
 * - `DELETE /boards/{id}/thumbnail` - detach and delete it. Owner only.
 *
 * Storage failures on upload are fatal. Clearing a thumbnail is also
 * strict about the blob delete, unlike card deletion.
 */

use axum::extract::Multipart;
use axum::Json;

use crate::backend::boards::db::replace_thumbnail;
use crate::backend::cards::handlers::remove_blob;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::permissions::{authorize, Principal};
use crate::backend::server::state::AppState;
use crate::backend::storage::keys::{image_key, key_from_url, thumbnail_key};
use crate::backend::uploads::multipart::read_file;
use crate::shared::board::ThumbnailResponse;
use crate::shared::share::ImageUploadResponse;
use crate::shared::{BoardId, Requirement, StatusResponse};

/// `POST /boards/{id}/images` and `POST /share/{token}/images`
pub async fn upload_image(
    state: &AppState,
    principal: &Principal,
    board_id: BoardId,
    multipart: Multipart,
) -> BackendResult<Json<ImageUploadResponse>> {
    authorize(&state.db, principal, board_id, Requirement::Edit).await?;

    let file = read_file(multipart).await?;
    let key = image_key(board_id, &file.extension());
    let size = file.bytes.len();
    let url = state.storage.put(&key, file.bytes, &file.content_type).await?;

    tracing::info!(board_id, %key, size, "Image uploaded");
    Ok(Json(ImageUploadResponse { url }))
}

/// `POST /boards/{id}/thumbnail`
///
/// A previous thumbnail stored under a different key (another extension)
/// is removed best-effort once the new URL is saved.
pub async fn set_thumbnail(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
    multipart: Multipart,
) -> BackendResult<Json<ThumbnailResponse>> {
    authorize(&state.db, &Principal::User(user.user_id), board_id, Requirement::Owner).await?;

    let file = read_file(multipart).await?;
    let key = thumbnail_key(board_id, &file.extension());
    let url = state.storage.put(&key, file.bytes, &file.content_type).await?;

    let previous = replace_thumbnail(&state.db, board_id, Some(&url))
        .await?
        .ok_or_else(|| BackendError::not_found("board not found"))?;

    if let Some(previous) = previous {
        if key_from_url(&previous).as_deref() != Some(key.as_str()) {
            remove_blob(state, &previous).await;
        }
    }

    tracing::info!(board_id, %key, "Thumbnail set");
    Ok(Json(ThumbnailResponse { thumbnail_url: url }))
}

/// `DELETE /boards/{id}/thumbnail`
///
/// The column is cleared first; a failing blob delete then surfaces as 500.
pub async fn clear_thumbnail(
    state: &AppState,
    user: &AuthenticatedUser,
    board_id: BoardId,
) -> BackendResult<Json<StatusResponse>> {
    authorize(&state.db, &Principal::User(user.user_id), board_id, Requirement::Owner).await?;

    let previous = replace_thumbnail(&state.db, board_id, None)
        .await?
        .ok_or_else(|| BackendError::not_found("board not found"))?;

    if let Some(url) = previous {
        match key_from_url(&url) {
            Some(key) => state.storage.delete(&key).await?,
            None => tracing::warn!(%url, "Thumbnail URL has no storage key; nothing to delete"),
        }
    }

    tracing::info!(board_id, "Thumbnail cleared");
    Ok(Json(StatusResponse::new("thumbnail deleted")))
}

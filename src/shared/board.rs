//! Board payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::card::Card;
use crate::shared::error::SharedError;
use crate::shared::permission::Permission;
use crate::shared::{BoardId, UserId};

/// A board row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: BoardId,
    pub owner_id: UserId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entry of `GET /boards`: a board plus what the caller may do with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub owner_id: UserId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub permission: Permission,
    pub is_owner: bool,
}

impl BoardSummary {
    pub fn new(board: Board, permission: Permission) -> Self {
        Self {
            id: board.id,
            owner_id: board.owner_id,
            title: board.title,
            thumbnail_url: board.thumbnail_url,
            created_at: board.created_at,
            is_owner: permission == Permission::Owner,
            permission,
        }
    }
}

/// `GET /boards/{id}` and `GET /share/{token}`: metadata with embedded cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDetail {
    pub id: BoardId,
    pub title: String,
    pub owner_id: UserId,
    pub permission: Permission,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub cards: Vec<Card>,
}

impl BoardDetail {
    pub fn new(board: Board, permission: Permission, cards: Vec<Card>) -> Self {
        Self {
            id: board.id,
            title: board.title,
            owner_id: board.owner_id,
            permission,
            thumbnail_url: board.thumbnail_url,
            created_at: board.created_at,
            cards,
        }
    }
}

/// Body of `POST /boards`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    #[serde(default)]
    pub title: String,
}

/// Body of `PUT /boards/{id}` (and of legacy `PUT /boards`, which carries the id)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameBoardRequest {
    #[serde(default)]
    pub id: Option<BoardId>,
    #[serde(default)]
    pub title: String,
}

/// Body of legacy `DELETE /boards`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBoardRequest {
    pub id: BoardId,
}

/// `POST /boards/{id}/thumbnail` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailResponse {
    pub thumbnail_url: String,
}

/// Trim a board title, rejecting blank ones.
pub fn normalize_title(raw: &str) -> Result<String, SharedError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(SharedError::validation("title", "title is required"));
    }
    Ok(title.to_string())
}

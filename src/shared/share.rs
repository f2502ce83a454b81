//! Share link payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::permission::{Permission, Scope};
use crate::shared::{BoardId, ShareId};

/// A share token bound to a board with a fixed scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShareToken {
    pub id: ShareId,
    pub board_id: BoardId,
    pub token: String,
    #[sqlx(try_from = "String")]
    pub permission: Scope,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /boards/{id}/share`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    #[serde(default)]
    pub permission: String,
}

/// Body of `DELETE /boards/{id}/share`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeShareRequest {
    pub share_id: ShareId,
}

/// `GET /permission/{token}` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub permission: Permission,
}

/// `POST .../images` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub url: String,
}

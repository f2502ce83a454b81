//! Access grant payloads
//!
//! A grant gives one registered user `read` or `edit` on one board. There is
//! at most one grant per (board, user); granting again replaces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::permission::Scope;
use crate::shared::{BoardId, UserId};

/// Row of `GET /boards/{id}/access`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccessGrant {
    pub id: i64,
    pub board_id: BoardId,
    pub user_id: UserId,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub permission: Scope,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /boards/{id}/access`
///
/// `permission` stays a string so a bad value is reported as a validation
/// error instead of a generic decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAccessRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub permission: String,
}

/// Body of `DELETE /boards/{id}/access`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeAccessRequest {
    pub user_id: UserId,
}

/**
 * Share Token Persistence
 *
 * Tokens are never updated in place: a scope change is a revoke followed by
 * a new token.
 */

use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sqlx::SqlitePool;

use crate::shared::share::ShareToken;
use crate::shared::{BoardId, Scope, ShareId};

/// Random bytes per token, hex-encoded to twice as many characters
pub const TOKEN_BYTES: usize = 16;

/// Fresh unguessable share token from the OS RNG.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Store `token` for `board_id`. A token collision surfaces as a
/// unique-constraint error.
pub async fn insert_share(
    db: &SqlitePool,
    board_id: BoardId,
    token: &str,
    scope: Scope,
) -> Result<ShareToken, sqlx::Error> {
    sqlx::query_as::<_, ShareToken>(
        r#"
        INSERT INTO board_shares (board_id, token, permission, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, board_id, token, permission, created_at
        "#,
    )
    .bind(board_id)
    .bind(token)
    .bind(scope.as_str())
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

pub async fn list_shares(db: &SqlitePool, board_id: BoardId) -> Result<Vec<ShareToken>, sqlx::Error> {
    sqlx::query_as::<_, ShareToken>(
        "SELECT id, board_id, token, permission, created_at FROM board_shares WHERE board_id = ? ORDER BY id",
    )
    .bind(board_id)
    .fetch_all(db)
    .await
}

/// Delete share `share_id` if it belongs to `board_id`.
pub async fn delete_share(db: &SqlitePool, board_id: BoardId, share_id: ShareId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM board_shares WHERE id = ? AND board_id = ?")
        .bind(share_id)
        .bind(board_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

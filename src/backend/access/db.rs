/**
 * Access Grant Persistence
 *
 * `board_access` holds at most one row per (board, user). Granting again
 * updates that row's permission in place.
 */

use chrono::Utc;
use sqlx::SqlitePool;

use crate::shared::access::AccessGrant;
use crate::shared::{BoardId, Scope, UserId};

/// Insert or replace the grant of `user_id` on `board_id`.
pub async fn upsert_grant(
    db: &SqlitePool,
    board_id: BoardId,
    user_id: UserId,
    scope: Scope,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO board_access (board_id, user_id, permission, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (board_id, user_id) DO UPDATE SET permission = excluded.permission
        "#,
    )
    .bind(board_id)
    .bind(user_id)
    .bind(scope.as_str())
    .bind(Utc::now())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn revoke_grant(db: &SqlitePool, board_id: BoardId, user_id: UserId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM board_access WHERE board_id = ? AND user_id = ?")
        .bind(board_id)
        .bind(user_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_grants(db: &SqlitePool, board_id: BoardId) -> Result<Vec<AccessGrant>, sqlx::Error> {
    sqlx::query_as::<_, AccessGrant>(
        r#"
        SELECT ba.id, ba.board_id, ba.user_id, u.email, ba.permission, ba.created_at
        FROM board_access ba
        JOIN users u ON ba.user_id = u.id
        WHERE ba.board_id = ?
        ORDER BY ba.id
        "#,
    )
    .bind(board_id)
    .fetch_all(db)
    .await
}

/**
 * Board Persistence
 *
 * Deleting a board relies on the schema's `ON DELETE CASCADE` to remove its
 * cards, grants and share links; no child table is touched here.
 */

use chrono::Utc;
use sqlx::SqlitePool;

use crate::shared::board::{Board, BoardSummary};
use crate::shared::{BoardId, Permission, UserId};

#[derive(Debug, sqlx::FromRow)]
struct BoardListRow {
    #[sqlx(flatten)]
    board: Board,
    permission: String,
}

pub async fn create_board(db: &SqlitePool, owner_id: UserId, title: &str) -> Result<Board, sqlx::Error> {
    sqlx::query_as::<_, Board>(
        r#"
        INSERT INTO boards (owner_id, title, created_at)
        VALUES (?, ?, ?)
        RETURNING id, owner_id, title, thumbnail_url, created_at
        "#,
    )
    .bind(owner_id)
    .bind(title)
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

pub async fn get_board(db: &SqlitePool, board_id: BoardId) -> Result<Option<Board>, sqlx::Error> {
    sqlx::query_as::<_, Board>(
        "SELECT id, owner_id, title, thumbnail_url, created_at FROM boards WHERE id = ?",
    )
    .bind(board_id)
    .fetch_optional(db)
    .await
}

/// Boards the user owns or has been granted, newest first.
pub async fn list_boards_for_user(
    db: &SqlitePool,
    user_id: UserId,
) -> Result<Vec<BoardSummary>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BoardListRow>(
        r#"
        SELECT b.id, b.owner_id, b.title, b.thumbnail_url, b.created_at,
               CASE WHEN b.owner_id = ?1 THEN 'owner' ELSE a.permission END AS permission
        FROM boards b
        LEFT JOIN board_access a ON a.board_id = b.id AND a.user_id = ?1
        WHERE b.owner_id = ?1 OR a.user_id IS NOT NULL
        ORDER BY b.created_at DESC, b.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    rows.into_iter()
        .map(|row| {
            let permission: Permission = row
                .permission
                .parse()
                .map_err(|e| sqlx::Error::Decode(format!("board permission: {}", e).into()))?;
            Ok(BoardSummary::new(row.board, permission))
        })
        .collect()
}

pub async fn rename_board(db: &SqlitePool, board_id: BoardId, title: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE boards SET title = ? WHERE id = ?")
        .bind(title)
        .bind(board_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_board(db: &SqlitePool, board_id: BoardId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM boards WHERE id = ?")
        .bind(board_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Set or clear the thumbnail URL, returning the previous one.
///
/// `None` as the outer result means the board does not exist.
pub async fn replace_thumbnail(
    db: &SqlitePool,
    board_id: BoardId,
    thumbnail_url: Option<&str>,
) -> Result<Option<Option<String>>, sqlx::Error> {
    let mut tx = db.begin().await?;

    let previous: Option<(Option<String>,)> =
        sqlx::query_as("SELECT thumbnail_url FROM boards WHERE id = ?")
            .bind(board_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some((previous,)) = previous else {
        return Ok(None);
    };

    sqlx::query("UPDATE boards SET thumbnail_url = ? WHERE id = ?")
        .bind(thumbnail_url)
        .bind(board_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(previous))
}

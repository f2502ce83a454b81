/**
 * Card Persistence
 *
 * The `cards` table stores both variants in one row shape: text cards use
 * `text`, image cards use `image_url`, `width` and `height`. `CardRow` is
 * the raw row; it only becomes a `Card` once its `kind` has been checked.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::shared::card::{Card, CardContent, CardKind, NewCard};
use crate::shared::{BoardId, CardId};

const CARD_COLUMNS: &str =
    "id, board_id, kind, text, image_url, width, height, position_x, position_y, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct CardRow {
    id: CardId,
    board_id: BoardId,
    kind: String,
    text: Option<String>,
    image_url: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    position_x: f64,
    position_y: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CardRow> for Card {
    type Error = sqlx::Error;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        let kind = CardKind::from_stored(&row.kind).ok_or_else(|| {
            sqlx::Error::Decode(format!("card {} has unknown kind '{}'", row.id, row.kind).into())
        })?;

        let content = match kind {
            CardKind::Text => CardContent::Text {
                text: row.text.unwrap_or_default(),
            },
            CardKind::Image => CardContent::Image {
                image_url: row.image_url.unwrap_or_default(),
                width: row.width,
                height: row.height,
            },
        };

        Ok(Card {
            id: row.id,
            board_id: row.board_id,
            content,
            position_x: row.position_x,
            position_y: row.position_y,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Column values of a card's payload, in `kind, text, image_url, width, height` order
fn content_columns(
    content: &CardContent,
) -> (&'static str, Option<&str>, Option<&str>, Option<f64>, Option<f64>) {
    match content {
        CardContent::Text { text } => ("text", Some(text.as_str()), None, None, None),
        CardContent::Image {
            image_url,
            width,
            height,
        } => ("image", None, Some(image_url.as_str()), *width, *height),
    }
}

pub async fn list_cards(db: &SqlitePool, board_id: BoardId) -> Result<Vec<Card>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CardRow>(&format!(
        "SELECT {} FROM cards WHERE board_id = ? ORDER BY id",
        CARD_COLUMNS
    ))
    .bind(board_id)
    .fetch_all(db)
    .await?;

    rows.into_iter().map(Card::try_from).collect()
}

pub async fn get_card(db: &SqlitePool, card_id: CardId) -> Result<Option<Card>, sqlx::Error> {
    let row = sqlx::query_as::<_, CardRow>(&format!("SELECT {} FROM cards WHERE id = ?", CARD_COLUMNS))
        .bind(card_id)
        .fetch_optional(db)
        .await?;

    row.map(Card::try_from).transpose()
}

pub async fn insert_card(
    db: &SqlitePool,
    board_id: BoardId,
    card: &NewCard,
) -> Result<Card, sqlx::Error> {
    let now = Utc::now();
    let (kind, text, image_url, width, height) = content_columns(&card.content);

    let row = sqlx::query_as::<_, CardRow>(&format!(
        r#"
        INSERT INTO cards (board_id, kind, text, image_url, width, height, position_x, position_y, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        CARD_COLUMNS
    ))
    .bind(board_id)
    .bind(kind)
    .bind(text)
    .bind(image_url)
    .bind(width)
    .bind(height)
    .bind(card.position_x)
    .bind(card.position_y)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await?;

    Card::try_from(row)
}

/// Write the mutable fields of `card` back. `kind` is never rewritten.
///
/// Returns `false` when the card no longer exists on its board.
pub async fn update_card(db: &SqlitePool, card: &Card) -> Result<bool, sqlx::Error> {
    let (_, text, _, width, height) = content_columns(&card.content);

    let result = sqlx::query(
        r#"
        UPDATE cards
        SET text = ?, width = ?, height = ?, position_x = ?, position_y = ?, updated_at = ?
        WHERE id = ? AND board_id = ?
        "#,
    )
    .bind(text)
    .bind(width)
    .bind(height)
    .bind(card.position_x)
    .bind(card.position_y)
    .bind(Utc::now())
    .bind(card.id)
    .bind(card.board_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_card(db: &SqlitePool, card_id: CardId, board_id: BoardId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cards WHERE id = ? AND board_id = ?")
        .bind(card_id)
        .bind(board_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// URLs of every image card on a board
pub async fn list_image_urls(db: &SqlitePool, board_id: BoardId) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT image_url FROM cards WHERE board_id = ? AND kind = 'image' AND image_url IS NOT NULL",
    )
    .bind(board_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(|(url,)| url).collect())
}

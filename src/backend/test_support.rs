//! Fixtures for unit tests that need a database.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::server::config::connect_database;
use crate::shared::{BoardId, UserId};

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    connect_database("sqlite::memory:", 1)
        .await
        .expect("in-memory database")
}

pub async fn insert_user(db: &SqlitePool, email: &str) -> UserId {
    let (id,): (UserId,) = sqlx::query_as(
        "INSERT INTO users (email, password_hash, created_at) VALUES (?, 'x', ?) RETURNING id",
    )
    .bind(email)
    .bind(Utc::now())
    .fetch_one(db)
    .await
    .expect("insert user");
    id
}

pub async fn insert_board(db: &SqlitePool, owner_id: UserId, title: &str) -> BoardId {
    let (id,): (BoardId,) = sqlx::query_as(
        "INSERT INTO boards (owner_id, title, created_at) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(owner_id)
    .bind(title)
    .bind(Utc::now())
    .fetch_one(db)
    .await
    .expect("insert board");
    id
}

//! Test application builder
//!
//! Every `TestApp` gets its own in-memory SQLite database, so tests never
//! share rows.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use corkboard::backend::auth::SessionKeys;
use corkboard::backend::server::config::{connect_database, ServerConfig, StorageConfig};
use corkboard::backend::server::{create_router, AppState};
use corkboard::backend::storage::{MemoryStorage, ObjectStorage};

pub const STORAGE_URL: &str = "https://memory.test";
pub const PASSWORD: &str = "correct horse";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// A signed-up user
pub struct Session {
    pub user_id: i64,
    pub email: String,
    pub token: String,
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        jwt_secret: "test-secret".to_string(),
        cors_origin: "https://board.example.com".to_string(),
        bcrypt_cost: 4,
        storage: StorageConfig::Memory {
            public_url: STORAGE_URL.to_string(),
        },
    }
}

impl TestApp {
    /// App backed by a [`MemoryStorage`] the caller can inspect.
    pub async fn new() -> (Self, MemoryStorage) {
        let storage = MemoryStorage::new(STORAGE_URL);
        let app = Self::with_storage(Arc::new(storage.clone())).await;
        (app, storage)
    }

    pub async fn with_storage(storage: Arc<dyn ObjectStorage>) -> Self {
        let config = test_config();
        let db = connect_database(&config.database_url, config.database_max_connections)
            .await
            .expect("in-memory database");
        let sessions = SessionKeys::new(&config.jwt_secret);

        let state = AppState::new(db, sessions, storage, config);
        let server = TestServer::new(create_router(state.clone())).expect("test server");

        Self { server, state }
    }

    pub async fn signup(&self, email: &str) -> Session {
        let response = self
            .server
            .post("/signup")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        Session {
            user_id: body["user"]["id"].as_i64().expect("user id"),
            email: body["user"]["email"].as_str().expect("email").to_string(),
            token: body["token"].as_str().expect("token").to_string(),
        }
    }

    /// Create a board owned by `owner` and return its id.
    pub async fn create_board(&self, owner: &Session, title: &str) -> i64 {
        let response = self
            .server
            .post("/boards")
            .authorization_bearer(&owner.token)
            .json(&json!({ "title": title }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["id"].as_i64().expect("board id")
    }

    /// Create a card on `board_id` as `owner` and return its JSON.
    pub async fn create_card(&self, owner: &Session, board_id: i64, body: Value) -> Value {
        let response = self
            .server
            .post(&format!("/boards/{}/cards", board_id))
            .authorization_bearer(&owner.token)
            .json(&body)
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// Create a share link and return its token.
    pub async fn create_share(&self, owner: &Session, board_id: i64, permission: &str) -> String {
        let response = self
            .server
            .post(&format!("/boards/{}/share", board_id))
            .authorization_bearer(&owner.token)
            .json(&json!({ "permission": permission }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["token"].as_str().expect("token").to_string()
    }

    pub async fn grant(&self, owner: &Session, board_id: i64, user_id: i64, permission: &str) {
        self.server
            .post(&format!("/boards/{}/access", board_id))
            .authorization_bearer(&owner.token)
            .json(&json!({ "user_id": user_id, "permission": permission }))
            .await
            .assert_status_ok();
    }

    pub async fn count_rows(&self, table: &str, board_id: i64) -> i64 {
        let (count,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {} WHERE board_id = ?", table))
                .bind(board_id)
                .fetch_one(&self.state.db)
                .await
                .expect("count rows");
        count
    }
}

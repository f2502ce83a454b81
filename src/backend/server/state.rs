/**
 * Application State
 *
 * `AppState` is the single container of process-wide resources. It is built
 * once at startup and handed to the dispatcher; handlers receive it by
 * reference and never reach for globals.
 *
 * # Contents
 *
 * - the SQLite pool (opened in `init`, closed after shutdown)
 * - the session signing keys
 * - the object storage backend
 * - the loaded configuration
 */

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::server::config::ServerConfig;
use crate::backend::storage::ObjectStorage;

#[derive(Clone)]
pub struct AppState {
    /// Relational store
    pub db: SqlitePool,

    /// Issues and validates session tokens
    pub sessions: SessionKeys,

    /// Blob store for uploaded images and thumbnails
    pub storage: Arc<dyn ObjectStorage>,

    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        sessions: SessionKeys,
        storage: Arc<dyn ObjectStorage>,
        config: ServerConfig,
    ) -> Self {
        Self {
            db,
            sessions,
            storage,
            config: Arc::new(config),
        }
    }
}

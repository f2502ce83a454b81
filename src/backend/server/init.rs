/**
 * Server Initialization
 *
 * Builds the process-wide resources once and hands them to the router:
 *
 * 1. open the SQLite pool and run migrations
 * 2. derive the session signing keys from `JWT_SECRET`
 * 3. construct the configured object storage backend
 *
 * Any failure aborts startup.
 */

use thiserror::Error;

use crate::backend::auth::SessionKeys;
use crate::backend::server::config::{connect_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::storage::{build_storage, StorageError};

pub use crate::backend::routes::create_router;

/// Why the server could not start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Open every resource `config` describes and bundle them into an `AppState`.
pub async fn init_state(config: ServerConfig) -> Result<AppState, StartupError> {
    tracing::info!("Initializing corkboard backend");

    let db = connect_database(&config.database_url, config.database_max_connections).await?;
    let sessions = SessionKeys::new(&config.jwt_secret);
    let storage = build_storage(&config.storage)?;

    tracing::info!(port = config.port, "Application state ready");
    Ok(AppState::new(db, sessions, storage, config))
}

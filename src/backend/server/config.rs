/**
 * Server Configuration
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary before this runs). Everything has a development default
 * except `JWT_SECRET`: signing sessions with a guessable key is worse than
 * refusing to start.
 *
 * # Variables
 *
 * | Variable                   | Default                 |
 * |----------------------------|-------------------------|
 * | `SERVER_PORT`              | `8080`                  |
 * | `DATABASE_URL`             | `sqlite://corkboard.db` |
 * | `DATABASE_MAX_CONNECTIONS` | `5`                     |
 * | `JWT_SECRET`               | required                |
 * | `CORS_ORIGIN`              | `*`                     |
 * | `BCRYPT_COST`              | `bcrypt::DEFAULT_COST`  |
 * | `STORAGE_BACKEND`          | `local`                 |
 * | `STORAGE_DIR`              | `uploads`               |
 * | `STORAGE_PUBLIC_URL`       | backend specific        |
 * | `STORAGE_ENDPOINT`         | required for `http`     |
 * | `STORAGE_BUCKET`           | required for `http`     |
 * | `STORAGE_TOKEN`            | unset                   |
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("unknown STORAGE_BACKEND '{0}' (expected local, http or memory)")]
    UnknownStorageBackend(String),
}

/// Where uploaded blobs go
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Local {
        dir: PathBuf,
        public_url: String,
    },
    Http {
        endpoint: String,
        bucket: String,
        public_url: Option<String>,
        token: Option<String>,
    },
    Memory {
        public_url: String,
    },
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub cors_origin: String,
    pub bcrypt_cost: u32,
    pub storage: StorageConfig,
}

/// Path the local backend's files are served under
pub const LOCAL_UPLOADS_ROUTE: &str = "/uploads";

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let storage = match var("STORAGE_BACKEND").as_deref().unwrap_or("local") {
            "local" => StorageConfig::Local {
                dir: PathBuf::from(var("STORAGE_DIR").unwrap_or_else(|| "uploads".to_string())),
                public_url: var("STORAGE_PUBLIC_URL")
                    .unwrap_or_else(|| LOCAL_UPLOADS_ROUTE.to_string()),
            },
            "http" => StorageConfig::Http {
                endpoint: var("STORAGE_ENDPOINT").ok_or(ConfigError::Missing("STORAGE_ENDPOINT"))?,
                bucket: var("STORAGE_BUCKET").ok_or(ConfigError::Missing("STORAGE_BUCKET"))?,
                public_url: var("STORAGE_PUBLIC_URL"),
                token: var("STORAGE_TOKEN"),
            },
            "memory" => StorageConfig::Memory {
                public_url: var("STORAGE_PUBLIC_URL").unwrap_or_else(|| "memory://objects".to_string()),
            },
            other => return Err(ConfigError::UnknownStorageBackend(other.to_string())),
        };

        Ok(Self {
            port: parse_var(&var, "SERVER_PORT", 8080)?,
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite://corkboard.db".to_string()),
            database_max_connections: parse_var(&var, "DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret,
            cors_origin: var("CORS_ORIGIN").unwrap_or_else(|| "*".to_string()),
            bcrypt_cost: parse_var(&var, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            storage,
        })
    }
}

fn parse_var<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

/// Open the SQLite pool and bring the schema up to date.
///
/// Foreign keys are switched on for every connection so that board deletion
/// cascades. In-memory databases are pinned to a single connection that is
/// never recycled, since each SQLite connection would otherwise get its own
/// empty database.
pub async fn connect_database(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

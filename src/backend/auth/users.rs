/**
 * User Model and Credential Store
 *
 * Users are created at signup and looked up by email at login. Passwords are
 * hashed with bcrypt; verification goes through `bcrypt::verify`, which
 * compares in constant time.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{SharedError, UserId};

/// User row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a user with an already hashed password.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, created_at)
        VALUES (?, ?, ?)
        RETURNING id, email, password_hash, created_at
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Trim and lower-case an email, rejecting obviously malformed ones.
pub fn normalize_email(raw: &str) -> Result<String, SharedError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(SharedError::validation("email", "a valid email is required"));
    }
    Ok(email)
}

/// Create an account.
///
/// # Errors
///
/// * `InvalidInput` - malformed email, empty password or email already taken
pub async fn register(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> BackendResult<User> {
    let email = normalize_email(email)?;
    if password.is_empty() {
        return Err(SharedError::validation("password", "password is required").into());
    }

    let password_hash = bcrypt::hash(password, bcrypt_cost).map_err(|e| {
        tracing::error!("Password hashing failed: {:?}", e);
        BackendError::internal("failed to hash password")
    })?;

    match create_user(pool, &email, &password_hash).await {
        Ok(user) => Ok(user),
        Err(e) if is_unique_violation(&e) => {
            tracing::info!("Signup rejected, email already registered: {}", email);
            Err(BackendError::invalid_input("email already registered"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Check an email/password pair.
///
/// Unknown emails and wrong passwords produce the same `Unauthenticated`
/// error so callers cannot probe for accounts.
pub async fn verify_credentials(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> BackendResult<User> {
    let invalid = || BackendError::unauthenticated("invalid credentials");

    let email = normalize_email(email).map_err(|_| invalid())?;
    let user = get_user_by_email(pool, &email).await?.ok_or_else(|| {
        tracing::warn!("Login for unknown email: {}", email);
        invalid()
    })?;

    let valid = bcrypt::verify(password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::internal("failed to verify password")
    })?;

    if !valid {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(invalid());
    }

    Ok(user)
}

/// Whether `error` is a UNIQUE constraint failure.
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|db_error| db_error.is_unique_violation())
        .unwrap_or(false)
}

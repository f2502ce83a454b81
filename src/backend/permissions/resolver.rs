/**
 * Permission Resolver
 *
 * `resolve` answers "what may this principal do on this board". It is a pure
 * read: no row is written and the same inputs against the same rows always
 * give the same answer. Storage errors propagate; they are never read as
 * "no access".
 *
 * # Resolution Order (users)
 *
 * 1. `boards.owner_id == user` → `owner`
 * 2. grant row for (board, user) → its scope
 * 3. otherwise → `none`
 *
 * Ownership is checked first so that a stray grant row for the owner can
 * never downgrade them.
 *
 * # Share Tokens
 *
 * A token resolves to its scope on the board it is bound to and to `none`
 * everywhere else. Tokens never carry `owner`.
 */

use sqlx::SqlitePool;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{BoardId, Permission, Requirement, Scope, UserId};

/// Whoever is making a request, passed explicitly to every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Signed-in user, from a validated session token
    User(UserId),
    /// Anonymous holder of a share link
    ShareToken(String),
}

/// Effective permission of `principal` on `board_id`.
pub async fn resolve(
    db: &SqlitePool,
    principal: &Principal,
    board_id: BoardId,
) -> Result<Permission, sqlx::Error> {
    match principal {
        Principal::User(user_id) => resolve_user(db, *user_id, board_id).await,
        Principal::ShareToken(token) => Ok(match resolve_share_token(db, token).await? {
            Some((bound_board, scope)) if bound_board == board_id => scope.into(),
            _ => Permission::None,
        }),
    }
}

async fn resolve_user(
    db: &SqlitePool,
    user_id: UserId,
    board_id: BoardId,
) -> Result<Permission, sqlx::Error> {
    let owned: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM boards WHERE id = ? AND owner_id = ?")
        .bind(board_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
    if owned.is_some() {
        return Ok(Permission::Owner);
    }

    let granted: Option<(String,)> =
        sqlx::query_as("SELECT permission FROM board_access WHERE board_id = ? AND user_id = ?")
            .bind(board_id)
            .bind(user_id)
            .fetch_optional(db)
            .await?;

    match granted {
        Some((permission,)) => {
            let scope: Scope = permission.parse().map_err(|e| {
                sqlx::Error::Decode(format!("board_access.permission: {}", e).into())
            })?;
            Ok(scope.into())
        }
        None => Ok(Permission::None),
    }
}

/// Board and scope a share token is bound to, if the token exists.
pub async fn resolve_share_token(
    db: &SqlitePool,
    token: &str,
) -> Result<Option<(BoardId, Scope)>, sqlx::Error> {
    let row: Option<(BoardId, String)> =
        sqlx::query_as("SELECT board_id, permission FROM board_shares WHERE token = ?")
            .bind(token)
            .fetch_optional(db)
            .await?;

    row.map(|(board_id, permission)| {
        permission
            .parse::<Scope>()
            .map(|scope| (board_id, scope))
            .map_err(|e| sqlx::Error::Decode(format!("board_shares.permission: {}", e).into()))
    })
    .transpose()
}

/// Permission a share token carries, `none` for unknown or revoked tokens.
pub async fn token_permission(db: &SqlitePool, token: &str) -> Result<Permission, sqlx::Error> {
    Ok(resolve_share_token(db, token)
        .await?
        .map(|(_, scope)| scope.into())
        .unwrap_or(Permission::None))
}

/// Resolve and check `requirement`, returning the effective permission.
///
/// # Errors
///
/// * `Forbidden` - the permission does not satisfy `requirement`
/// * `Database` - the lookup itself failed
pub async fn authorize(
    db: &SqlitePool,
    principal: &Principal,
    board_id: BoardId,
    requirement: Requirement,
) -> BackendResult<Permission> {
    let permission = resolve(db, principal, board_id).await?;

    if !permission.satisfies(requirement) {
        tracing::debug!(
            ?requirement,
            %permission,
            board_id,
            "Permission check failed"
        );
        return Err(BackendError::forbidden(match requirement {
            Requirement::Owner => "only the board owner can do this",
            _ => "insufficient permission",
        }));
    }

    Ok(permission)
}

/**
 * Authentication Handler Types
 *
 * Request and response bodies of the identity endpoints.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::shared::UserId;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by signup and login
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Session token (72-hour expiration)
    pub token: String,
    pub user: UserResponse,
}

/// User information that is safe to return to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// `GET /me` response
#[derive(Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub user_id: UserId,
    pub email: String,
}

/// Query of `GET /users/lookup`
#[derive(Deserialize, Serialize, Debug)]
pub struct LookupQuery {
    #[serde(default)]
    pub email: String,
}

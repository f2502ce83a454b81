//! Middleware Module
//!
//! - **`auth`** - bearer session authentication
//! - **`cors`** - `CorsLayer` construction, preflight and no-store handling

/// Bearer session authentication
pub mod auth;

/// CORS headers and preflight
pub mod cors;

pub use auth::{authenticate, AuthenticatedUser};
pub use cors::{cors_layer, no_store_middleware};

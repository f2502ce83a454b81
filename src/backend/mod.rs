//! Backend Module
//!
//! The corkboard HTTP server. Only compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - configuration, application state, startup
//! - **`routes`** - route table, dispatcher, router assembly
//! - **`auth`** - identity provider and credential store
//! - **`middleware`** - bearer authentication, CORS
//! - **`permissions`** - resolution of none/read/edit/owner per board
//! - **`boards`**, **`cards`** - board and card persistence and handlers
//! - **`access`** - per-user grants
//! - **`share`** - anonymous share links
//! - **`uploads`** - image and thumbnail uploads
//! - **`storage`** - object storage backends
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Request Flow
//!
//! ```text
//! request → CORS → dispatch → Route::parse
//!         → authenticate (session) | share_board (token)
//!         → handler → authorize(principal, board, requirement)
//!         → store → JSON response
//! ```
//!
//! The resolved principal is an explicit argument all the way down; there
//! is no request-scoped ambient identity.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Permission resolution
pub mod permissions;

/// Boards
pub mod boards;

/// Cards
pub mod cards;

/// Per-user access grants
pub mod access;

/// Share links
pub mod share;

/// Image upload gateway
pub mod uploads;

/// Object storage
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::BackendError;

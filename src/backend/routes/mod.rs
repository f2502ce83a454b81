//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs       - Module exports
//! ├── table.rs     - Path → Route parsing with fixed suffix priority
//! ├── dispatch.rs  - Identity, method check and handler call per route
//! └── router.rs    - Axum router, static uploads and layers
//! ```
//!
//! # Routes
//!
//! ## Identity
//!
//! - `POST /signup`, `POST /login`
//! - `GET /me`, `GET /users/lookup?email=`
//!
//! ## Boards (session token)
//!
//! - `GET|POST|PUT|DELETE /boards`
//! - `GET|PUT|DELETE /boards/{id}`
//! - `GET|POST /boards/{id}/cards`
//! - `GET|POST|DELETE /boards/{id}/access`
//! - `GET|POST|DELETE /boards/{id}/share`
//! - `POST|DELETE /boards/{id}/thumbnail`
//! - `POST /boards/{id}/images`
//! - `PUT|DELETE /cards/{id}`
//!
//! ## Share links (token in the path)
//!
//! - `GET /share/{token}`
//! - `GET|POST /share/{token}/cards`
//! - `PUT|DELETE /share/{token}/cards/{id}`
//! - `POST /share/{token}/images`
//! - `GET /permission/{token}` (public)

/// Route table
pub mod table;

/// Request dispatcher
pub mod dispatch;

/// Main router creation
pub mod router;

pub use router::create_router;
pub use table::Route;

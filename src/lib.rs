//! Corkboard - Main Library
//!
//! Corkboard is the backend of a collaborative whiteboard: users own boards,
//! boards hold positioned text and image cards, and access is delegated either
//! to other registered users or to anyone holding an anonymous share link.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - Permission lattice, board/card/share/access payloads
//!   - Validation error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server with a single path dispatcher
//!   - Permission resolution over ownership, grants and share tokens
//!   - SQLite persistence through sqlx
//!   - Object storage gateway for uploaded images
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend modules and the
//!   `corkboard-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use corkboard::backend::server::{config::ServerConfig, init::{create_router, init_state}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let state = init_state(config).await?;
//! let app = create_router(state);
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

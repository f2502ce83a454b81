//! Boards
//!
//! - **`db`** - board rows, the per-user listing, cascading delete
//! - **`handlers`** - list, create, detail, rename, delete

/// Board persistence
pub mod db;

/// Board handlers
pub mod handlers;

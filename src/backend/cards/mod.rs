//! Cards
//!
//! - **`db`** - card rows and their conversion to the `Card` sum type
//! - **`handlers`** - list/create/update/delete, shared by signed-in and
//!   share-link routes

/// Card persistence
pub mod db;

/// Card handlers
pub mod handlers;

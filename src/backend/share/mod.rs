//! Share Links
//!
//! Anonymous bearer tokens bound to one board with a fixed `read` or
//! `edit` scope.

/// Token generation and persistence
pub mod db;

/// Share management and anonymous board view
pub mod handlers;

//! Access Grants
//!
//! Durable per-user permissions on a board, separate from ownership and
//! from share links.

/// Grant persistence
pub mod db;

/// Grant handlers
pub mod handlers;

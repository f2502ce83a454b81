//! Permission Resolution
//!
//! Reconciles the three independent access paths to a board into a single
//! [`Permission`](crate::shared::Permission):
//!
//! 1. ownership (`boards.owner_id`)
//! 2. a per-user grant (`board_access`)
//! 3. an anonymous share token (`board_shares`)
//!
//! Nothing here is cached or stored; every call reads the current rows.

/// Resolver and authorization gate
pub mod resolver;

pub use resolver::{authorize, resolve, resolve_share_token, token_permission, Principal};

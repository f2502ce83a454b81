//! Shared Module
//!
//! Types that travel over the wire between the corkboard server and its
//! clients. Nothing in here depends on the HTTP stack, so front-end crates can
//! use the same request and response shapes the server validates.
//!
//! # Overview
//!
//! - **`permission`** - the `none < read < edit < owner` lattice and the
//!   storable `read`/`edit` scope
//! - **`board`** / **`card`** - board metadata and the text/image card variants
//! - **`access`** / **`share`** - per-user grants and anonymous share links
//! - **`error`** - payload validation errors

/// Permission lattice
pub mod permission;

/// Board payloads
pub mod board;

/// Card payloads and mutation rules
pub mod card;

/// Per-user access grants
pub mod access;

/// Anonymous share tokens
pub mod share;

/// Shared error types
pub mod error;

use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type BoardId = i64;
pub type CardId = i64;
pub type ShareId = i64;

/// `{"status": "..."}` acknowledgement returned by mutations without a body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Re-export commonly used types for convenience
pub use board::{Board, BoardDetail, BoardSummary};
pub use card::{Card, CardContent, CardKind};
pub use error::SharedError;
pub use permission::{Permission, Requirement, Scope};

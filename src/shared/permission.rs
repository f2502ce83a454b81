//! Permission Lattice
//!
//! Every principal ends up holding exactly one [`Permission`] over a board.
//! The levels are totally ordered `none < read < edit < owner`, but `owner`
//! is only *required* for destructive or administrative operations; for card
//! mutation it behaves like `edit`.
//!
//! Durable records (access grants, share tokens) can only ever carry a
//! [`Scope`], which is the `read`/`edit` subset of the lattice. Ownership is
//! never stored as a grant: it is derived from `boards.owner_id`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Effective capability a principal holds over a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    None,
    Read,
    Edit,
    Owner,
}

/// Capability an operation demands before it may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// List or view a board and its cards
    Read,
    /// Create, update or delete cards, upload images
    Edit,
    /// Manage grants and share links, rename/delete the board, set its thumbnail
    Owner,
}

/// Storable permission for grants and share tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Read,
    Edit,
}

impl Permission {
    /// Whether this permission is enough for `requirement`.
    ///
    /// `Owner` is matched exactly; the other requirements are lower bounds.
    pub fn satisfies(self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Read => self >= Permission::Read,
            Requirement::Edit => self >= Permission::Edit,
            Requirement::Owner => self == Permission::Owner,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::Read => "read",
            Permission::Edit => "edit",
            Permission::Owner => "owner",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = SharedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Permission::None),
            "read" => Ok(Permission::Read),
            "edit" => Ok(Permission::Edit),
            "owner" => Ok(Permission::Owner),
            _ => Err(SharedError::validation(
                "permission",
                format!("unknown permission '{}'", value),
            )),
        }
    }
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Read => "read",
            Scope::Edit => "edit",
        }
    }
}

impl From<Scope> for Permission {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Read => Permission::Read,
            Scope::Edit => Permission::Edit,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = SharedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Scope::Read),
            "edit" => Ok(Scope::Edit),
            _ => Err(SharedError::validation(
                "permission",
                "Permission must be 'read' or 'edit'",
            )),
        }
    }
}

// Lets sqlx decode `permission` TEXT columns straight into a Scope.
impl TryFrom<String> for Scope {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

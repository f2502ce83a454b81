//! Card Types and Mutation Rules
//!
//! A card is a positioned item on a board. It is either a text note or an
//! image reference; the two shapes share their identity and position and
//! differ only in payload, which is modelled as the [`CardContent`] sum type.
//!
//! The rules that decide what a create or update request turns into live
//! here, away from the database, so they can be tested in isolation:
//!
//! - `kind` defaults to `text` when absent or blank, and can never change
//!   after creation.
//! - Image cards need a non-empty `image_url` at creation time.
//! - Updates are partial: an omitted field keeps its stored value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::{BoardId, CardId};

/// Discriminant of [`CardContent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Text,
    Image,
}

impl CardKind {
    /// Parse the `kind` of a create request. Absent or blank means `text`.
    pub fn from_request(raw: Option<&str>) -> Result<Self, SharedError> {
        let normalized = raw.map(|kind| kind.trim().to_lowercase()).unwrap_or_default();
        match normalized.as_str() {
            "" | "text" => Ok(CardKind::Text),
            "image" => Ok(CardKind::Image),
            _ => Err(SharedError::validation(
                "kind",
                "invalid kind (must be 'text' or 'image')",
            )),
        }
    }

    /// Interpret a stored `kind` column. Legacy rows carry an empty string,
    /// which predates image cards and therefore means `text`.
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "" | "text" => Some(CardKind::Text),
            "image" => Some(CardKind::Image),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Text => "text",
            CardKind::Image => "image",
        }
    }
}

/// Kind-specific payload of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardContent {
    Text {
        text: String,
    },
    Image {
        image_url: String,
        width: Option<f64>,
        height: Option<f64>,
    },
}

impl CardContent {
    pub fn kind(&self) -> CardKind {
        match self {
            CardContent::Text { .. } => CardKind::Text,
            CardContent::Image { .. } => CardKind::Image,
        }
    }

    /// URL of the backing blob, for image cards
    pub fn image_url(&self) -> Option<&str> {
        match self {
            CardContent::Image { image_url, .. } => Some(image_url),
            CardContent::Text { .. } => None,
        }
    }
}

/// A card as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub board_id: BoardId,
    #[serde(flatten)]
    pub content: CardContent,
    pub position_x: f64,
    pub position_y: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn kind(&self) -> CardKind {
        self.content.kind()
    }
}

/// A validated card that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub content: CardContent,
    pub position_x: f64,
    pub position_y: f64,
}

/// Body of `POST .../cards`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub kind: Option<String>,
    pub text: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub position_x: f64,
    #[serde(default)]
    pub position_y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl CreateCardRequest {
    /// Turn the loose request body into a [`NewCard`].
    ///
    /// # Errors
    ///
    /// - unknown `kind`
    /// - `kind = "image"` without a non-blank `image_url`
    pub fn validate(self) -> Result<NewCard, SharedError> {
        let content = match CardKind::from_request(self.kind.as_deref())? {
            CardKind::Text => {
                let text = self.text.unwrap_or_default();
                // whitespace-only notes are stored empty
                let text = if text.trim().is_empty() { String::new() } else { text };
                CardContent::Text { text }
            }
            CardKind::Image => {
                let image_url = self
                    .image_url
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| {
                        SharedError::validation("image_url", "image_url is required for kind=image")
                    })?;
                CardContent::Image {
                    image_url,
                    width: self.width,
                    height: self.height,
                }
            }
        };

        Ok(NewCard {
            content,
            position_x: self.position_x,
            position_y: self.position_y,
        })
    }
}

/// Body of `PUT /cards/{id}` and `PUT /share/{token}/cards/{id}`
///
/// Every field is optional. Fields that belong to the other card kind are
/// ignored; `kind`, when present, must match the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    pub kind: Option<String>,
    pub text: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl UpdateCardRequest {
    /// Merge this update onto the stored card and return the result.
    ///
    /// The returned card keeps `id`, `board_id` and timestamps of `current`;
    /// callers decide whether anything changed by comparing the two.
    pub fn apply_to(self, current: &Card) -> Result<Card, SharedError> {
        if let Some(requested) = self.kind.as_deref().filter(|kind| !kind.trim().is_empty()) {
            let requested = CardKind::from_request(Some(requested))?;
            if requested != current.kind() {
                return Err(SharedError::validation(
                    "kind",
                    format!("card kind cannot be changed (card is '{}')", current.kind().as_str()),
                ));
            }
        }

        let content = match &current.content {
            CardContent::Text { text } => CardContent::Text {
                text: self.text.unwrap_or_else(|| text.clone()),
            },
            CardContent::Image {
                image_url,
                width,
                height,
            } => CardContent::Image {
                image_url: image_url.clone(),
                width: self.width.or(*width),
                height: self.height.or(*height),
            },
        };

        Ok(Card {
            content,
            position_x: self.position_x.unwrap_or(current.position_x),
            position_y: self.position_y.unwrap_or(current.position_y),
            ..current.clone()
        })
    }
}

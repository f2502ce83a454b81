/**
 * Route Table
 *
 * Maps a request path onto a [`Route`]. Paths are matched by hand rather
 * than through axum's path templates: several resources nest under
 * `/boards/{id}/...` and the suffixes are checked in a fixed order
 *
 * 1. `/cards`
 * 2. `/access`
 * 3. `/share`
 * 4. `/thumbnail`
 * 5. `/images`
 * 6. nothing (board detail)
 *
 * so the same path always lands on the same operation. Methods are not
 * part of the table; the dispatcher checks them after authentication.
 */

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{BoardId, CardId};

/// Suffixes of `/boards/{id}/...`, in match priority order
const BOARD_SUFFIXES: [(&str, BoardRoute); 5] = [
    ("cards", BoardRoute::Cards),
    ("access", BoardRoute::Access),
    ("share", BoardRoute::Share),
    ("thumbnail", BoardRoute::Thumbnail),
    ("images", BoardRoute::Images),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoardRoute {
    Cards,
    Access,
    Share,
    Thumbnail,
    Images,
}

/// Every path the server answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Signup,
    Login,
    Me,
    UserLookup,
    /// `/boards`
    Boards,
    /// `/boards/{id}`
    Board(BoardId),
    /// `/boards/{id}/cards`
    BoardCards(BoardId),
    /// `/boards/{id}/access`
    BoardAccess(BoardId),
    /// `/boards/{id}/share`
    BoardShare(BoardId),
    /// `/boards/{id}/thumbnail`
    BoardThumbnail(BoardId),
    /// `/boards/{id}/images`
    BoardImages(BoardId),
    /// `/cards/{id}`
    Card(CardId),
    /// `/share/{token}`
    Share(String),
    /// `/share/{token}/cards`
    ShareCards(String),
    /// `/share/{token}/cards/{id}`
    ShareCard(String, CardId),
    /// `/share/{token}/images`
    ShareImages(String),
    /// `/permission/{token}`
    Permission(String),
}

impl Route {
    /// Parse `path` (no query string).
    ///
    /// # Errors
    ///
    /// * `NotFound` - no route has this shape
    /// * `InvalidInput` - the shape matches but an id is not a number
    pub fn parse(path: &str) -> BackendResult<Self> {
        let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        let route = match segments.as_slice() {
            ["signup"] => Route::Signup,
            ["login"] => Route::Login,
            ["me"] => Route::Me,
            ["users", "lookup"] => Route::UserLookup,
            ["boards"] => Route::Boards,
            ["boards", rest @ ..] => Self::parse_board(rest)?,
            ["cards", id] => Route::Card(parse_id(id, "card")?),
            ["share", token] => Route::Share(parse_token(token)?),
            ["share", token, "cards"] => Route::ShareCards(parse_token(token)?),
            ["share", token, "cards", id] => {
                Route::ShareCard(parse_token(token)?, parse_id(id, "card")?)
            }
            ["share", token, "images"] => Route::ShareImages(parse_token(token)?),
            ["permission", token] => Route::Permission(parse_token(token)?),
            _ => return Err(not_found()),
        };

        Ok(route)
    }

    fn parse_board(rest: &[&str]) -> BackendResult<Self> {
        if let [id, suffix] = rest {
            let matched = BOARD_SUFFIXES
                .iter()
                .find(|(name, _)| name == suffix)
                .map(|(_, route)| *route);
            let Some(board_route) = matched else {
                return Err(not_found());
            };

            let board_id = parse_id(id, "board")?;
            return Ok(match board_route {
                BoardRoute::Cards => Route::BoardCards(board_id),
                BoardRoute::Access => Route::BoardAccess(board_id),
                BoardRoute::Share => Route::BoardShare(board_id),
                BoardRoute::Thumbnail => Route::BoardThumbnail(board_id),
                BoardRoute::Images => Route::BoardImages(board_id),
            });
        }

        match rest {
            [id] => Ok(Route::Board(parse_id(id, "board")?)),
            _ => Err(not_found()),
        }
    }

    /// The share token a `/share/{token}...` route carries.
    ///
    /// `/permission/{token}` is excluded: it reports on the token and never
    /// acts with it.
    pub fn share_token(&self) -> Option<&str> {
        match self {
            Route::Share(token)
            | Route::ShareCards(token)
            | Route::ShareCard(token, _)
            | Route::ShareImages(token) => Some(token),
            _ => None,
        }
    }
}

fn parse_id(raw: &str, what: &str) -> BackendResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| BackendError::invalid_input(format!("invalid {} id", what)))
}

fn parse_token(raw: &str) -> BackendResult<String> {
    if raw.is_empty() {
        return Err(not_found());
    }
    Ok(raw.to_string())
}

fn not_found() -> BackendError {
    BackendError::not_found("Not found")
}

/**
 * Request Dispatcher
 *
 * The router's fallback handler. Every request goes through
 *
 * 1. [`Route::parse`] on the path (404 / 400)
 * 2. identity: session token for user routes (401), share token for
 *    `/share/{token}...` routes (403), nothing for the public ones
 * 3. the method check (405)
 * 4. body extraction (400) and the handler
 *
 * The identity found in step 2 is passed to the handler as an argument.
 */

use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::access::handlers as access;
use crate::backend::auth::handlers::{get_me, login, lookup_user, signup, LookupQuery};
use crate::backend::boards::handlers as boards;
use crate::backend::cards::handlers as cards;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{authenticate, AuthenticatedUser};
use crate::backend::permissions::Principal;
use crate::backend::routes::table::Route;
use crate::backend::server::state::AppState;
use crate::backend::share::handlers as share;
use crate::backend::uploads::handlers as uploads;
use crate::shared::board::{DeleteBoardRequest, RenameBoardRequest};

/// Fallback handler serving every API path.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match handle(&state, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(%method, %path, status = error.status_code().as_u16(), "request failed");
            error.into_response()
        }
    }
}

async fn handle(state: &AppState, request: Request) -> BackendResult<Response> {
    let route = Route::parse(request.uri().path())?;

    if let Some(token) = route.share_token().map(str::to_string) {
        return share_route(state, route, token, request).await;
    }

    match route {
        Route::Signup | Route::Login | Route::Permission(_) => public_route(state, route, request).await,
        _ => {
            let user = authenticate(state, request.headers()).await?;
            user_route(state, route, &user, request).await
        }
    }
}

async fn public_route(state: &AppState, route: Route, request: Request) -> BackendResult<Response> {
    let method = request.method().clone();

    let response = match (route, method) {
        (Route::Signup, Method::POST) => signup(state, json(state, request).await?).await?.into_response(),
        (Route::Login, Method::POST) => login(state, json(state, request).await?).await?.into_response(),
        (Route::Permission(token), Method::GET) => share::permission_lookup(state, &token).await?.into_response(),
        _ => return Err(BackendError::MethodNotAllowed),
    };

    Ok(response)
}

async fn share_route(state: &AppState, route: Route, token: String, request: Request) -> BackendResult<Response> {
    let (board_id, permission) = share::share_board(state, &token).await?;
    let principal = Principal::ShareToken(token);
    let method = request.method().clone();

    let response = match (route, method) {
        (Route::Share(_), Method::GET) => share::share_detail(state, board_id, permission).await?.into_response(),
        (Route::ShareCards(_), Method::GET) => cards::list_cards(state, &principal, board_id).await?.into_response(),
        (Route::ShareCards(_), Method::POST) => {
            cards::create_card(state, &principal, board_id, json(state, request).await?)
                .await?
                .into_response()
        }
        (Route::ShareCard(_, card_id), Method::PUT) => {
            cards::update_card(state, &principal, Some(board_id), card_id, json(state, request).await?)
                .await?
                .into_response()
        }
        (Route::ShareCard(_, card_id), Method::DELETE) => {
            cards::delete_card(state, &principal, Some(board_id), card_id)
                .await?
                .into_response()
        }
        (Route::ShareImages(_), Method::POST) => {
            uploads::upload_image(state, &principal, board_id, multipart(state, request).await?)
                .await?
                .into_response()
        }
        _ => return Err(BackendError::MethodNotAllowed),
    };

    Ok(response)
}

async fn user_route(
    state: &AppState,
    route: Route,
    user: &AuthenticatedUser,
    request: Request,
) -> BackendResult<Response> {
    let principal = Principal::User(user.user_id);
    let method = request.method().clone();

    let response = match (route, method) {
        (Route::Me, Method::GET) => get_me(user).await?.into_response(),
        (Route::UserLookup, Method::GET) => {
            let Query(query) = Query::<LookupQuery>::try_from_uri(request.uri())?;
            lookup_user(state, query).await?.into_response()
        }

        (Route::Boards, Method::GET) => boards::list_boards(state, user).await?.into_response(),
        (Route::Boards, Method::POST) => {
            boards::create_board(state, user, json(state, request).await?)
                .await?
                .into_response()
        }
        // Legacy forms carrying the board id in the body
        (Route::Boards, Method::PUT) => {
            let body: RenameBoardRequest = json(state, request).await?;
            let board_id = body.id.ok_or_else(|| BackendError::invalid_input("id is required"))?;
            boards::rename_board(state, user, board_id, &body.title).await?.into_response()
        }
        (Route::Boards, Method::DELETE) => {
            let body: DeleteBoardRequest = json(state, request).await?;
            boards::delete_board(state, user, body.id).await?.into_response()
        }

        (Route::Board(board_id), Method::GET) => boards::board_detail(state, &principal, board_id).await?.into_response(),
        (Route::Board(board_id), Method::PUT) => {
            let body: RenameBoardRequest = json(state, request).await?;
            boards::rename_board(state, user, board_id, &body.title).await?.into_response()
        }
        (Route::Board(board_id), Method::DELETE) => boards::delete_board(state, user, board_id).await?.into_response(),

        (Route::BoardCards(board_id), Method::GET) => cards::list_cards(state, &principal, board_id).await?.into_response(),
        (Route::BoardCards(board_id), Method::POST) => {
            cards::create_card(state, &principal, board_id, json(state, request).await?)
                .await?
                .into_response()
        }

        (Route::BoardAccess(board_id), Method::GET) => access::list_access(state, user, board_id).await?.into_response(),
        (Route::BoardAccess(board_id), Method::POST) => {
            access::grant_access(state, user, board_id, json(state, request).await?)
                .await?
                .into_response()
        }
        (Route::BoardAccess(board_id), Method::DELETE) => {
            access::revoke_access(state, user, board_id, json(state, request).await?)
                .await?
                .into_response()
        }

        (Route::BoardShare(board_id), Method::GET) => share::list_shares(state, user, board_id).await?.into_response(),
        (Route::BoardShare(board_id), Method::POST) => {
            share::create_share(state, user, board_id, json(state, request).await?)
                .await?
                .into_response()
        }
        (Route::BoardShare(board_id), Method::DELETE) => {
            share::revoke_share(state, user, board_id, json(state, request).await?)
                .await?
                .into_response()
        }

        (Route::BoardThumbnail(board_id), Method::POST) => {
            uploads::set_thumbnail(state, user, board_id, multipart(state, request).await?)
                .await?
                .into_response()
        }
        (Route::BoardThumbnail(board_id), Method::DELETE) => {
            uploads::clear_thumbnail(state, user, board_id).await?.into_response()
        }
        (Route::BoardImages(board_id), Method::POST) => {
            uploads::upload_image(state, &principal, board_id, multipart(state, request).await?)
                .await?
                .into_response()
        }

        (Route::Card(card_id), Method::PUT) => {
            cards::update_card(state, &principal, None, card_id, json(state, request).await?)
                .await?
                .into_response()
        }
        (Route::Card(card_id), Method::DELETE) => {
            cards::delete_card(state, &principal, None, card_id).await?.into_response()
        }

        _ => return Err(BackendError::MethodNotAllowed),
    };

    Ok(response)
}

async fn json<T: DeserializeOwned>(state: &AppState, request: Request) -> BackendResult<T> {
    let Json(body) = Json::<T>::from_request(request, state).await?;
    Ok(body)
}

async fn multipart(state: &AppState, request: Request) -> BackendResult<Multipart> {
    Ok(Multipart::from_request(request, state).await?)
}

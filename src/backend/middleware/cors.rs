/**
 * CORS
 *
 * The allow headers come from tower-http's [`CorsLayer`], built from the
 * configured origin. `CorsLayer` answers every `OPTIONS` request itself, so
 * preflights never reach the dispatcher.
 *
 * [`no_store_middleware`] wraps the layer from the outside: it turns those
 * preflight answers into an empty 204 and marks every response uncacheable,
 * since responses depend on the caller's session.
 */

use axum::{
    body::Body,
    extract::Request,
    http::{
        header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, ORIGIN, PRAGMA},
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer for `origin` (`*` allows any origin).
pub fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("CORS_ORIGIN is not a valid header value, falling back to *");
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .vary([AUTHORIZATION, ORIGIN])
}

/// Empty 204 for `OPTIONS`, no-store cache headers on everything.
pub async fn no_store_middleware(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if preflight {
        *response.status_mut() = StatusCode::NO_CONTENT;
        *response.body_mut() = Body::empty();
    }

    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    response
}

/**
 * Router Configuration
 *
 * The API is served by a single fallback handler, [`dispatch`], which does
 * its own path matching. The router only adds what sits around it:
 *
 * - `/uploads` static files when blobs are stored on local disk
 * - request tracing
 * - CORS (tower-http) and empty 204 preflight answers
 * - a 10 MiB request body limit
 */

use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::middleware::{cors_layer, no_store_middleware};
use crate::backend::routes::dispatch::dispatch;
use crate::backend::server::config::{StorageConfig, LOCAL_UPLOADS_ROUTE};
use crate::backend::server::state::AppState;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 10 << 20;

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router<()> {
    let mut router = Router::new();

    if let StorageConfig::Local { dir, .. } = &state.config.storage {
        tracing::info!(dir = %dir.display(), route = LOCAL_UPLOADS_ROUTE, "Serving local uploads");
        router = router.nest_service(LOCAL_UPLOADS_ROUTE, ServeDir::new(dir));
    }

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(no_store_middleware))
        .layer(cors_layer(&state.config.cors_origin))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    router.fallback(dispatch).layer(layers).with_state(state)
}

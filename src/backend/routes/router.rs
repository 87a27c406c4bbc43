/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` logs every request/response pair through `tracing`
 * - The auth middleware is attached per route group (see `api_routes`)
 *
 * # Fallback
 *
 * Unknown paths get the same JSON error body as every other failure.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{configure_auth_routes, configure_resource_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_auth_routes(router, &app_state);
    let router = configure_resource_routes(router, &app_state);

    router
        .fallback(|| async { BackendError::not_found("route", "") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server.
 *
 * # Initialization Process
 *
 * 1. Open the database and run migrations
 * 2. Build the token manager from the auth configuration
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create the application from ready-made state
///
/// Used directly by tests, which bring their own in-memory pool.
pub fn create_app(app_state: AppState) -> Router<()> {
    create_router(app_state)
}

/// Connect to the configured database and build the application
///
/// # Errors
///
/// Fails when the database cannot be opened or migrations fail. Unlike
/// optional services, the API cannot run without its store.
pub async fn build_app(config: &ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing blog API server");

    let db_pool = connect_database(&config.database_url).await?;
    let app_state = AppState::new(db_pool, &config.auth);

    tracing::info!("Router configured");

    Ok(create_app(app_state))
}

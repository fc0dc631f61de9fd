/**
 * Application Initialization
 *
 * Builds the Axum application:
 *
 * 1. **Load Database**: connection pool + migrations
 * 2. **Create State**: `AppState` shared by all handlers
 * 3. **Create Router**: route wiring, auth middleware, trace/CORS layers
 */

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;

/// Create the Axum application with all routes and middleware configured
///
/// # Errors
///
/// Fails if the database pool cannot be created or migrations fail.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    let db_pool = load_database().await?;
    let app_state = AppState { db_pool };

    Ok(create_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}

/// Create the application against an existing pool (used by tests)
pub fn create_app_with_pool(db_pool: sqlx::SqlitePool) -> Router {
    let app_state = AppState { db_pool };
    create_router(app_state)
}

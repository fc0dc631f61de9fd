/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public routes (health check, user provisioning) - no auth
 * 2. API routes - behind the acting-user auth middleware
 * 3. Fallback handler (404)
 */

use axum::Router;

use crate::backend::middleware::auth::auth_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as user_handlers;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Public Routes
///
/// - `GET /health` - Liveness probe
/// - `POST /api/users` - Provision a user (mirrors the external identity
///   store; the upstream gateway is expected to guard this in production)
///
/// ## Protected Routes
///
/// Everything else under `/api` requires a resolved acting user in the
/// `X-User-Id` header; see `configure_api_routes` for the full list.
pub fn create_router(app_state: AppState) -> Router<()> {
    let public = Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
        .route("/api/users", axum::routing::post(user_handlers::create_user));

    let protected = configure_api_routes(Router::new()).route_layer(
        axum::middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );

    let router = public.merge(protected);

    // Fallback handler for 404
    let router =
        router.fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") });

    router.with_state(app_state)
}

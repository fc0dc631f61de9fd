/**
 * Application State Management
 *
 * The `AppState` struct is the central state container for the Axum
 * application. All request-scoped operations are stateless between
 * requests; the database pool is the sole shared mutable resource.
 *
 * The `FromRef` implementations allow handlers to extract specific parts
 * of the state without needing the entire `AppState`, following Axum's
 * recommended pattern.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// Every state-changing service operation begins its own transaction
    /// on this pool.
    pub db_pool: SqlitePool,
}

/// Allow handlers to extract the pool directly via `State(SqlitePool)`
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

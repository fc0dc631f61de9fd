/**
 * Server Configuration
 *
 * Loads the SQLite connection pool and runs migrations at startup.
 *
 * # Configuration Sources
 *
 * Configuration comes from environment variables, with sensible defaults
 * for local development:
 *
 * - `DATABASE_URL` - sqlx SQLite URL (default: `sqlite:pinboard.db?mode=rwc`)
 * - `SERVER_PORT` - HTTP listen port (default: 3000, read in main)
 *
 * Unlike optional services, the datastore is the sole shared mutable
 * resource of this backend, so failing to open it is a startup error
 * rather than a degraded mode.
 */

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Default database location for local development
const DEFAULT_DATABASE_URL: &str = "sqlite:pinboard.db?mode=rwc";

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from the environment (falling back to a local
///    SQLite file)
/// 2. Creates the connection pool
/// 3. Runs database migrations
///
/// # Errors
///
/// Returns the underlying sqlx error if the pool cannot be created or
/// migrations fail.
pub async fn load_database() -> Result<SqlitePool, sqlx::Error> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    tracing::info!("Connecting to database...");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        sqlx::Error::Migrate(Box::new(e))
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

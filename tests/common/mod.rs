//! Common test utilities and helpers
//!
//! Provides the in-memory database fixture and seed helpers shared by
//! the integration tests.

#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use pinboard::backend::boards::db::{create_board, Board};
use pinboard::backend::pins::db::{create_pin, NewPin, Pin};
use pinboard::backend::users::db::{create_user, User};
use pinboard::shared::Visibility;

/// Create a test database connection pool
///
/// Uses a single-connection pool against `sqlite::memory:` so every test
/// gets an isolated, fully migrated database with no external daemon.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Test database fixture
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a new migrated in-memory database
    pub async fn new() -> Self {
        Self {
            pool: create_test_pool().await,
        }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Seed a user with the given handle
pub async fn seed_user(pool: &SqlitePool, username: &str) -> User {
    create_user(pool, username)
        .await
        .expect("Failed to seed user")
}

/// Seed a public board owned by `owner_id`
pub async fn seed_board(pool: &SqlitePool, owner_id: &str, title: &str) -> Board {
    create_board(pool, owner_id, title, None, Visibility::Public)
        .await
        .expect("Failed to seed board")
}

/// Seed a pin owned by `owner_id` on `board_id`
pub async fn seed_pin(pool: &SqlitePool, owner_id: &str, board_id: &str, title: &str) -> Pin {
    create_pin(
        pool,
        owner_id,
        NewPin {
            board_id: board_id.to_string(),
            title: title.to_string(),
            description: Some("seeded".to_string()),
            image_url: "https://img.example/pin.png".to_string(),
            source_url: None,
            visibility: Visibility::Public,
            is_draft: false,
        },
    )
    .await
    .expect("Failed to seed pin")
}

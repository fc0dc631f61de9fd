/**
 * User Model and Database Operations
 *
 * The identity store proper (credentials, token issuance) is external;
 * this table mirrors the fields the backend needs: id, unique handle and
 * the active flag. Users are never deleted by this subsystem, only
 * deactivated.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Opaque unique user ID
    pub id: String,
    /// Handle (unique)
    pub username: String,
    /// Deactivated users fail authentication but keep their rows
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's unique handle
///
/// # Returns
/// Created user, or `AlreadyExists` if the handle is taken
pub async fn create_user(pool: &SqlitePool, username: &str) -> Result<User, BackendError> {
    if username.trim().is_empty() {
        return Err(BackendError::missing_input("username"));
    }

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Err(BackendError::already_exists("user"));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, is_active, created_at, updated_at)
        VALUES (?, ?, 1, ?, ?)
        RETURNING id, username, is_active, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(username)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn find_user_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, BackendError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, is_active, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, BackendError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, is_active, created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID, failing with `NotFound` if absent
pub async fn require_user(pool: &SqlitePool, id: &str) -> Result<User, BackendError> {
    find_user_by_id(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("user"))
}

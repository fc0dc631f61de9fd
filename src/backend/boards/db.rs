/**
 * Board Model and Database Operations
 *
 * Boards are owned exclusively by their owner; collaborators are granted,
 * never co-owners. A Collaborator row is created only as a side effect of
 * an invitation transitioning to ACCEPTED - there is no direct create.
 *
 * `pin_count` is an advisory denormalized counter maintained with atomic
 * in-place updates (clamped at zero on decrement).
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{Permission, Visibility};

/// Board struct representing a board in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: String,
    pub owner_user_id: String,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub visibility: Visibility,
    pub is_collaborative: bool,
    pub pin_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A standing (board, user, permission) grant authorizing non-owner
/// board mutation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collaborator {
    pub id: String,
    pub board_id: String,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub permission: Permission,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a new board owned by `owner_user_id`
pub async fn create_board(
    pool: &SqlitePool,
    owner_user_id: &str,
    title: &str,
    description: Option<&str>,
    visibility: Visibility,
) -> Result<Board, BackendError> {
    if title.trim().is_empty() {
        return Err(BackendError::missing_input("title"));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let board = sqlx::query_as::<_, Board>(
        r#"
        INSERT INTO boards (id, owner_user_id, title, description, visibility,
                            is_collaborative, pin_count, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?)
        RETURNING id, owner_user_id, title, description, visibility,
                  is_collaborative, pin_count, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(owner_user_id)
    .bind(title)
    .bind(description)
    .bind(visibility.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(board)
}

/// Get board by ID
pub async fn find_board(pool: &SqlitePool, id: &str) -> Result<Option<Board>, BackendError> {
    let board = sqlx::query_as::<_, Board>(
        r#"
        SELECT id, owner_user_id, title, description, visibility,
               is_collaborative, pin_count, created_at, updated_at
        FROM boards
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(board)
}

/// Get board by ID, failing with `NotFound` if absent
pub async fn require_board(pool: &SqlitePool, id: &str) -> Result<Board, BackendError> {
    find_board(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("board"))
}

/// Mark a board as collaborative (idempotent set)
pub async fn set_collaborative<'c, E>(executor: E, board_id: &str) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Sqlite>,
{
    sqlx::query("UPDATE boards SET is_collaborative = 1, updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(board_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Atomically adjust a board's advisory pin counter in place
///
/// Decrements clamp at zero rather than erroring.
pub async fn adjust_pin_count<'c, E>(
    executor: E,
    board_id: &str,
    delta: i64,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Sqlite>,
{
    sqlx::query("UPDATE boards SET pin_count = max(pin_count + ?, 0) WHERE id = ?")
        .bind(delta)
        .bind(board_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Get the collaborator grant for (board, user), if any
pub async fn find_collaborator(
    pool: &SqlitePool,
    board_id: &str,
    user_id: &str,
) -> Result<Option<Collaborator>, BackendError> {
    let collaborator = sqlx::query_as::<_, Collaborator>(
        r#"
        SELECT id, board_id, user_id, permission, created_at, updated_at
        FROM board_collaborators
        WHERE board_id = ? AND user_id = ?
        "#,
    )
    .bind(board_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(collaborator)
}

/// Create or update the collaborator grant for (board, user)
///
/// If a grant already exists from a prior invitation cycle its permission
/// is overwritten with the newly accepted value.
pub async fn upsert_collaborator<'c, E>(
    executor: E,
    board_id: &str,
    user_id: &str,
    permission: Permission,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Sqlite>,
{
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO board_collaborators (id, board_id, user_id, permission, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (board_id, user_id) DO UPDATE SET
            permission = excluded.permission,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(board_id)
    .bind(user_id)
    .bind(permission.as_str())
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// List all collaborator grants on a board
pub async fn list_collaborators(
    pool: &SqlitePool,
    board_id: &str,
) -> Result<Vec<Collaborator>, BackendError> {
    let collaborators = sqlx::query_as::<_, Collaborator>(
        r#"
        SELECT id, board_id, user_id, permission, created_at, updated_at
        FROM board_collaborators
        WHERE board_id = ?
        ORDER BY created_at ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    Ok(collaborators)
}

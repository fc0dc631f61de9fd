/**
 * Block Registry
 *
 * Directional blocker -> blocked relations with a symmetric check. A
 * block in either direction suppresses follow, invitation and pin
 * interaction operations between the pair; callers go through
 * `ensure_not_blocked` rather than re-implementing the rule locally.
 *
 * Blocking deletes any follow edges between the pair (both directions) in
 * the same transaction as the relation insert.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::users::db::require_user;

/// A directional block relation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlockRelation {
    pub id: String,
    pub blocker_id: String,
    pub blocked_id: String,
    pub created_at: DateTime<Utc>,
}

/// True iff `blocker` has blocked `blocked`
pub async fn is_blocked(
    pool: &SqlitePool,
    blocker_id: &str,
    blocked_id: &str,
) -> Result<bool, BackendError> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM block_relations
        WHERE blocker_id = ? AND blocked_id = ?
        "#,
    )
    .bind(blocker_id)
    .bind(blocked_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// True iff a block relation exists between the pair in either direction
pub async fn is_mutually_blocked(
    pool: &SqlitePool,
    a: &str,
    b: &str,
) -> Result<bool, BackendError> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM block_relations
        WHERE (blocker_id = ? AND blocked_id = ?)
           OR (blocker_id = ? AND blocked_id = ?)
        "#,
    )
    .bind(a)
    .bind(b)
    .bind(b)
    .bind(a)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Cross-cutting guard: fail with `Blocked` if a block relation exists
/// between the pair in either direction
///
/// Called by follow, invitation and pin interaction operations before
/// their own logic.
pub async fn ensure_not_blocked(pool: &SqlitePool, a: &str, b: &str) -> Result<(), BackendError> {
    if is_mutually_blocked(pool, a, b).await? {
        return Err(BackendError::Blocked);
    }
    Ok(())
}

/// Block a user
///
/// Inserts the relation and, in the same transaction, deletes any follow
/// edges between the pair in either direction.
///
/// # Errors
/// - `SelfReference` if blocker == blocked
/// - `NotFound` if the target user does not exist
/// - `AlreadyExists` if the relation is already present
pub async fn block(
    pool: &SqlitePool,
    blocker_id: &str,
    blocked_id: &str,
) -> Result<BlockRelation, BackendError> {
    if blocker_id == blocked_id {
        return Err(BackendError::self_reference("block"));
    }
    require_user(pool, blocked_id).await?;

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM block_relations WHERE blocker_id = ? AND blocked_id = ?",
    )
    .bind(blocker_id)
    .bind(blocked_id)
    .fetch_one(&mut *tx)
    .await?;
    if existing > 0 {
        return Err(BackendError::already_exists("block relation"));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO block_relations (id, blocker_id, blocked_id, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(blocker_id)
    .bind(blocked_id)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| BackendError::unique_or_database("block relation", e))?;

    // Sever the follow graph between the pair, both directions.
    sqlx::query(
        r#"
        DELETE FROM follow_edges
        WHERE (follower_id = ? AND following_id = ?)
           OR (follower_id = ? AND following_id = ?)
        "#,
    )
    .bind(blocker_id)
    .bind(blocked_id)
    .bind(blocked_id)
    .bind(blocker_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(BlockRelation {
        id,
        blocker_id: blocker_id.to_string(),
        blocked_id: blocked_id.to_string(),
        created_at: now,
    })
}

/// Remove a block relation
///
/// # Errors
/// - `NotFound` if no relation exists for (blocker, blocked)
pub async fn unblock(
    pool: &SqlitePool,
    blocker_id: &str,
    blocked_id: &str,
) -> Result<(), BackendError> {
    let result = sqlx::query(
        r#"
        DELETE FROM block_relations
        WHERE blocker_id = ? AND blocked_id = ?
        "#,
    )
    .bind(blocker_id)
    .bind(blocked_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("block relation"));
    }

    Ok(())
}

/**
 * Follow Graph
 *
 * Directed follow edges between users, no self-loops. Follower and
 * following counts are computed from the edge table on read rather than
 * cached on the user row; this is a deliberate simplicity trade-off
 * versus the denormalized pin counters.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::notifications::db::notify;
use crate::backend::social::blocks::ensure_not_blocked;
use crate::backend::users::db::require_user;
use crate::shared::NotificationType;

/// A directed follow edge
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FollowEdge {
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub created_at: DateTime<Utc>,
}

/// Follow a user
///
/// Emits a best-effort NEW_FOLLOWER notification to the target after the
/// edge commits.
///
/// # Errors
/// - `SelfReference` if follower == target
/// - `NotFound` if the target user does not exist
/// - `Blocked` if a block relation exists between the pair
/// - `AlreadyExists` if the edge is already present
pub async fn follow(
    pool: &SqlitePool,
    follower_id: &str,
    target_id: &str,
) -> Result<FollowEdge, BackendError> {
    if follower_id == target_id {
        return Err(BackendError::self_reference("follow"));
    }
    let target = require_user(pool, target_id).await?;
    ensure_not_blocked(pool, follower_id, target_id).await?;

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM follow_edges WHERE follower_id = ? AND following_id = ?",
    )
    .bind(follower_id)
    .bind(target_id)
    .fetch_one(&mut *tx)
    .await?;
    if existing > 0 {
        return Err(BackendError::already_exists("follow edge"));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO follow_edges (id, follower_id, following_id, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(follower_id)
    .bind(target_id)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| BackendError::unique_or_database("follow edge", e))?;

    tx.commit().await?;

    notify(
        pool,
        &target.id,
        Some(follower_id),
        NotificationType::NewFollower,
        "You have a new follower",
        Some(follower_id),
        Some("user"),
    )
    .await;

    Ok(FollowEdge {
        id,
        follower_id: follower_id.to_string(),
        following_id: target_id.to_string(),
        created_at: now,
    })
}

/// Unfollow a user
///
/// # Errors
/// - `NotFound` if no edge exists for (follower, target)
pub async fn unfollow(
    pool: &SqlitePool,
    follower_id: &str,
    target_id: &str,
) -> Result<(), BackendError> {
    let result = sqlx::query(
        r#"
        DELETE FROM follow_edges
        WHERE follower_id = ? AND following_id = ?
        "#,
    )
    .bind(follower_id)
    .bind(target_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("follow edge"));
    }

    Ok(())
}

/// True iff `follower` follows `target`
pub async fn is_following(
    pool: &SqlitePool,
    follower_id: &str,
    target_id: &str,
) -> Result<bool, BackendError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM follow_edges WHERE follower_id = ? AND following_id = ?",
    )
    .bind(follower_id)
    .bind(target_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Number of users following `user_id`, computed on read
pub async fn follower_count(pool: &SqlitePool, user_id: &str) -> Result<i64, BackendError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follow_edges WHERE following_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Number of users `user_id` follows, computed on read
pub async fn following_count(pool: &SqlitePool, user_id: &str) -> Result<i64, BackendError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follow_edges WHERE follower_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

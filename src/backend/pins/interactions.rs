/**
 * Pin Interaction Engine
 *
 * Like/unlike and save/unsave with counter maintenance and idempotency
 * guarantees.
 *
 * # Consistency
 *
 * Relation-row mutation and counter delta commit in one transaction: a
 * crash between them is never observable as a like without its count (or
 * vice versa). Counter updates are atomic in-place SQL
 * (`like_count = like_count + 1`, `max(save_count - 1, 0)`), never
 * read-modify-write at the application layer. Decrements clamp at zero.
 *
 * # Copy-on-save
 *
 * Saving is not a pointer to the original pin: it clones the pin's
 * content into a brand-new Pin owned by the saver, inside a board the
 * saver owns. The clone starts with zero engagement. The same original
 * may be saved into multiple boards (one independent clone each), but
 * not twice into the same board.
 *
 * Notifications here are best-effort and fire after the commit.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::boards::db::{adjust_pin_count, require_board};
use crate::backend::error::BackendError;
use crate::backend::notifications::db::notify;
use crate::backend::pins::db::{require_pin, Pin};
use crate::backend::social::blocks::ensure_not_blocked;
use crate::shared::NotificationType;

/// Existence of this row is the "liked" predicate; no update, only
/// create/delete
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PinLike {
    pub id: String,
    pub pin_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// A copy-on-save record tying the original pin to the saver's clone
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedPin {
    pub id: String,
    pub pin_id: String,
    pub user_id: String,
    pub board_id: String,
    pub copied_pin_id: String,
    pub created_at: DateTime<Utc>,
}

/// Like a pin
///
/// Inserts the like row and increments `like_count` by exactly one in the
/// same unit of work. Emits a best-effort PIN_LIKED notification to the
/// pin owner unless the liker owns the pin.
///
/// # Errors
/// - `NotFound` if the pin does not exist
/// - `Blocked` if a block relation exists with the pin owner
/// - `AlreadyExists` if the user already liked this pin
pub async fn like(pool: &SqlitePool, user_id: &str, pin_id: &str) -> Result<PinLike, BackendError> {
    let pin = require_pin(pool, pin_id).await?;
    if pin.owner_user_id != user_id {
        ensure_not_blocked(pool, user_id, &pin.owner_user_id).await?;
    }

    let mut tx = pool.begin().await?;

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pin_likes WHERE pin_id = ? AND user_id = ?")
            .bind(pin_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
    if existing > 0 {
        return Err(BackendError::already_exists("like"));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO pin_likes (id, pin_id, user_id, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(pin_id)
    .bind(user_id)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| BackendError::unique_or_database("like", e))?;

    sqlx::query("UPDATE pins SET like_count = like_count + 1 WHERE id = ?")
        .bind(pin_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    if pin.owner_user_id != user_id {
        notify(
            pool,
            &pin.owner_user_id,
            Some(user_id),
            NotificationType::PinLiked,
            &format!("Your pin \"{}\" was liked", pin.title),
            Some(pin_id),
            Some("pin"),
        )
        .await;
    }

    Ok(PinLike {
        id,
        pin_id: pin_id.to_string(),
        user_id: user_id.to_string(),
        created_at: now,
    })
}

/// Remove a like
///
/// Deletes the like row and decrements `like_count`, clamped at zero.
///
/// # Errors
/// - `NotFound` if no like exists for (pin, user)
pub async fn unlike(pool: &SqlitePool, user_id: &str, pin_id: &str) -> Result<(), BackendError> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM pin_likes WHERE pin_id = ? AND user_id = ?")
        .bind(pin_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(BackendError::not_found("like"));
    }

    sqlx::query("UPDATE pins SET like_count = max(like_count - 1, 0) WHERE id = ?")
        .bind(pin_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// True iff the user has liked the pin
pub async fn is_liked(pool: &SqlitePool, user_id: &str, pin_id: &str) -> Result<bool, BackendError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pin_likes WHERE pin_id = ? AND user_id = ?")
            .bind(pin_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

/// Save a pin into one of the saver's own boards (copy-on-save)
///
/// Creates the clone, the SavedPin record and the original's counter
/// bump in a single transaction, then emits a best-effort PIN_SAVED
/// notification to the original owner if different from the saver.
/// Returns the newly created clone.
///
/// # Errors
/// - `MissingInput` if `board_id` is empty (board selection is mandatory)
/// - `NotFound` if the original pin or the target board is absent
/// - `Unauthorized` if the target board is not owned by the saver
/// - `Blocked` if a block relation exists with the original owner
/// - `AlreadyExists` if this pin is already saved into this board
pub async fn save(
    pool: &SqlitePool,
    user_id: &str,
    pin_id: &str,
    board_id: &str,
) -> Result<Pin, BackendError> {
    if board_id.trim().is_empty() {
        return Err(BackendError::missing_input("board_id"));
    }

    let original = require_pin(pool, pin_id).await?;

    let board = require_board(pool, board_id).await?;
    if board.owner_user_id != user_id {
        return Err(BackendError::unauthorized(
            "pins may only be saved into your own boards",
        ));
    }

    if original.owner_user_id != user_id {
        ensure_not_blocked(pool, user_id, &original.owner_user_id).await?;
    }

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM saved_pins WHERE pin_id = ? AND user_id = ? AND board_id = ?",
    )
    .bind(pin_id)
    .bind(user_id)
    .bind(board_id)
    .fetch_one(&mut *tx)
    .await?;
    if existing > 0 {
        return Err(BackendError::already_exists("saved pin"));
    }

    let clone_id = Uuid::new_v4().to_string();
    let saved_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    // The clone is a new content object, not a re-export of the
    // original's stats: zero engagement, not a draft, never sponsored.
    sqlx::query(
        r#"
        INSERT INTO pins (id, owner_user_id, board_id, title, description, image_url,
                          source_url, visibility, is_draft, is_sponsored, save_count,
                          like_count, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0, 0, ?, ?)
        "#,
    )
    .bind(&clone_id)
    .bind(user_id)
    .bind(board_id)
    .bind(&original.title)
    .bind(&original.description)
    .bind(&original.image_url)
    .bind(&original.source_url)
    .bind(original.visibility.as_str())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO saved_pins (id, pin_id, user_id, board_id, copied_pin_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&saved_id)
    .bind(pin_id)
    .bind(user_id)
    .bind(board_id)
    .bind(&clone_id)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| BackendError::unique_or_database("saved pin", e))?;

    sqlx::query("UPDATE pins SET save_count = save_count + 1 WHERE id = ?")
        .bind(pin_id)
        .execute(&mut *tx)
        .await?;

    adjust_pin_count(&mut *tx, board_id, 1).await?;

    tx.commit().await?;

    if original.owner_user_id != user_id {
        notify(
            pool,
            &original.owner_user_id,
            Some(user_id),
            NotificationType::PinSaved,
            &format!("Your pin \"{}\" was saved", original.title),
            Some(pin_id),
            Some("pin"),
        )
        .await;
    }

    Ok(Pin {
        id: clone_id,
        owner_user_id: user_id.to_string(),
        board_id: board_id.to_string(),
        title: original.title,
        description: original.description,
        image_url: original.image_url,
        source_url: original.source_url,
        visibility: original.visibility,
        is_draft: false,
        is_sponsored: false,
        save_count: 0,
        like_count: 0,
        created_at: now,
        updated_at: now,
    })
}

/// Remove a saved copy of a pin
///
/// When the user saved the same original into multiple boards, the most
/// recently saved copy is removed. Deletes the clone (if it still
/// exists), the SavedPin row and decrements the original's `save_count`,
/// clamped at zero.
///
/// # Errors
/// - `NotFound` if no SavedPin exists for (pin, user)
pub async fn unsave(pool: &SqlitePool, user_id: &str, pin_id: &str) -> Result<(), BackendError> {
    let mut tx = pool.begin().await?;

    let saved = sqlx::query_as::<_, SavedPin>(
        r#"
        SELECT id, pin_id, user_id, board_id, copied_pin_id, created_at
        FROM saved_pins
        WHERE pin_id = ? AND user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(pin_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| BackendError::not_found("saved pin"))?;

    // The clone may have collected likes or saves of its own; those rows
    // reference it and must go first.
    sqlx::query("DELETE FROM pin_likes WHERE pin_id = ?")
        .bind(&saved.copied_pin_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM saved_pins WHERE pin_id = ?")
        .bind(&saved.copied_pin_id)
        .execute(&mut *tx)
        .await?;

    // The clone may have been deleted independently; only adjust the
    // board counter when a row actually goes away.
    let clone_deleted = sqlx::query("DELETE FROM pins WHERE id = ?")
        .bind(&saved.copied_pin_id)
        .execute(&mut *tx)
        .await?;
    if clone_deleted.rows_affected() > 0 {
        adjust_pin_count(&mut *tx, &saved.board_id, -1).await?;
    }

    sqlx::query("DELETE FROM saved_pins WHERE id = ?")
        .bind(&saved.id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE pins SET save_count = max(save_count - 1, 0) WHERE id = ?")
        .bind(pin_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// True iff the user has a saved copy of the pin in any board
pub async fn is_saved(pool: &SqlitePool, user_id: &str, pin_id: &str) -> Result<bool, BackendError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM saved_pins WHERE pin_id = ? AND user_id = ?",
    )
    .bind(pin_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// List a user's saved-pin records for a given original pin
pub async fn saved_copies(
    pool: &SqlitePool,
    user_id: &str,
    pin_id: &str,
) -> Result<Vec<SavedPin>, BackendError> {
    let copies = sqlx::query_as::<_, SavedPin>(
        r#"
        SELECT id, pin_id, user_id, board_id, copied_pin_id, created_at
        FROM saved_pins
        WHERE pin_id = ? AND user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(pin_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(copies)
}

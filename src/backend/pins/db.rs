/**
 * Pin Model and Database Operations
 *
 * A pin belongs to exactly one board at a time; board reassignment is an
 * explicit update. Create, update and delete all go through the board
 * access policy (`can_edit`) with no other exemptions - this is what
 * collaborator EDIT grants buy.
 *
 * `save_count` and `like_count` are denormalized counters owned by the
 * interaction engine; this module only initializes them.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::boards::access::can_edit;
use crate::backend::boards::db::adjust_pin_count;
use crate::backend::error::BackendError;
use crate::shared::Visibility;

/// Pin struct representing a pin in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pin {
    pub id: String,
    pub owner_user_id: String,
    pub board_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub source_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub visibility: Visibility,
    pub is_draft: bool,
    pub is_sponsored: bool,
    pub save_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a pin
#[derive(Debug, Clone, Deserialize)]
pub struct NewPin {
    pub board_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub source_url: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_draft: bool,
}

/// Fields for updating a pin; `board_id` moves it to another board
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub board_id: Option<String>,
}

const PIN_COLUMNS: &str = "id, owner_user_id, board_id, title, description, image_url, \
                           source_url, visibility, is_draft, is_sponsored, save_count, \
                           like_count, created_at, updated_at";

/// Get pin by ID
pub async fn find_pin(pool: &SqlitePool, id: &str) -> Result<Option<Pin>, BackendError> {
    let pin = sqlx::query_as::<_, Pin>(&format!("SELECT {} FROM pins WHERE id = ?", PIN_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(pin)
}

/// Get pin by ID, failing with `NotFound` if absent
pub async fn require_pin(pool: &SqlitePool, id: &str) -> Result<Pin, BackendError> {
    find_pin(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("pin"))
}

/// Create a pin on a board the acting user may edit
///
/// # Errors
/// - `NotFound` if the board does not exist
/// - `Unauthorized` if the actor is neither owner nor EDIT collaborator
pub async fn create_pin(
    pool: &SqlitePool,
    acting_user_id: &str,
    new_pin: NewPin,
) -> Result<Pin, BackendError> {
    if new_pin.title.trim().is_empty() {
        return Err(BackendError::missing_input("title"));
    }
    if new_pin.image_url.trim().is_empty() {
        return Err(BackendError::missing_input("image_url"));
    }
    if !can_edit(pool, acting_user_id, &new_pin.board_id).await? {
        return Err(BackendError::unauthorized(
            "no edit permission on this board",
        ));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO pins (id, owner_user_id, board_id, title, description, image_url,
                          source_url, visibility, is_draft, is_sponsored, save_count,
                          like_count, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(acting_user_id)
    .bind(&new_pin.board_id)
    .bind(&new_pin.title)
    .bind(&new_pin.description)
    .bind(&new_pin.image_url)
    .bind(&new_pin.source_url)
    .bind(new_pin.visibility.as_str())
    .bind(new_pin.is_draft)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    adjust_pin_count(&mut *tx, &new_pin.board_id, 1).await?;

    tx.commit().await?;

    Ok(Pin {
        id,
        owner_user_id: acting_user_id.to_string(),
        board_id: new_pin.board_id,
        title: new_pin.title,
        description: new_pin.description,
        image_url: new_pin.image_url,
        source_url: new_pin.source_url,
        visibility: new_pin.visibility,
        is_draft: new_pin.is_draft,
        is_sponsored: false,
        save_count: 0,
        like_count: 0,
        created_at: now,
        updated_at: now,
    })
}

/// Update a pin; moving it between boards adjusts both advisory counters
///
/// # Errors
/// - `NotFound` if the pin (or target board) does not exist
/// - `Unauthorized` without edit permission on the current board (and the
///   target board, when moving)
pub async fn update_pin(
    pool: &SqlitePool,
    acting_user_id: &str,
    pin_id: &str,
    update: PinUpdate,
) -> Result<Pin, BackendError> {
    let pin = require_pin(pool, pin_id).await?;

    if !can_edit(pool, acting_user_id, &pin.board_id).await? {
        return Err(BackendError::unauthorized(
            "no edit permission on this board",
        ));
    }

    let target_board = update.board_id.clone().unwrap_or_else(|| pin.board_id.clone());
    let moving = target_board != pin.board_id;
    if moving && !can_edit(pool, acting_user_id, &target_board).await? {
        return Err(BackendError::unauthorized(
            "no edit permission on the target board",
        ));
    }

    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE pins
        SET title = COALESCE(?, title),
            description = COALESCE(?, description),
            board_id = ?,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&update.title)
    .bind(&update.description)
    .bind(&target_board)
    .bind(now)
    .bind(pin_id)
    .execute(&mut *tx)
    .await?;

    if moving {
        adjust_pin_count(&mut *tx, &pin.board_id, -1).await?;
        adjust_pin_count(&mut *tx, &target_board, 1).await?;
    }

    tx.commit().await?;

    require_pin(pool, pin_id).await
}

/// Delete a pin together with its like rows and any save records of it,
/// decrementing the board counter
///
/// # Errors
/// - `NotFound` if the pin does not exist
/// - `Unauthorized` without edit permission on the pin's board
pub async fn delete_pin(
    pool: &SqlitePool,
    acting_user_id: &str,
    pin_id: &str,
) -> Result<(), BackendError> {
    let pin = require_pin(pool, pin_id).await?;

    if !can_edit(pool, acting_user_id, &pin.board_id).await? {
        return Err(BackendError::unauthorized(
            "no edit permission on this board",
        ));
    }

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM pin_likes WHERE pin_id = ?")
        .bind(pin_id)
        .execute(&mut *tx)
        .await?;
    // Other users' save records of this pin go with it; their clones are
    // independent pins and survive (copied_pin_id is not enforced).
    sqlx::query("DELETE FROM saved_pins WHERE pin_id = ?")
        .bind(pin_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM pins WHERE id = ?")
        .bind(pin_id)
        .execute(&mut *tx)
        .await?;
    adjust_pin_count(&mut *tx, &pin.board_id, -1).await?;

    tx.commit().await?;

    Ok(())
}

/**
 * Board Access Policy
 *
 * Pure derivation of effective permission for a (user, board) pair, with
 * no side effects. This is the single gate consumed by pin create, update
 * and delete: those operations call `can_edit` and fail Unauthorized if
 * it returns false, with no other exemptions.
 */

use sqlx::SqlitePool;

use crate::backend::boards::db::{find_collaborator, require_board};
use crate::backend::error::BackendError;
use crate::shared::{Permission, Visibility};

/// True iff `user_id` may mutate pins on `board_id`
///
/// The user may edit when they own the board, or when they hold a
/// collaborator grant with EDIT permission. A VIEW grant does not confer
/// edit rights.
///
/// # Errors
/// - `NotFound` if the board does not exist
pub async fn can_edit(
    pool: &SqlitePool,
    user_id: &str,
    board_id: &str,
) -> Result<bool, BackendError> {
    let board = require_board(pool, board_id).await?;
    if board.owner_user_id == user_id {
        return Ok(true);
    }

    Ok(find_collaborator(pool, board_id, user_id)
        .await?
        .map(|c| c.permission == Permission::Edit)
        .unwrap_or(false))
}

/// True iff `user_id` may view `board_id`
///
/// PUBLIC boards are always viewable; PRIVATE boards are viewable by the
/// owner and any collaborator regardless of permission level.
pub async fn can_view(
    pool: &SqlitePool,
    user_id: &str,
    board_id: &str,
) -> Result<bool, BackendError> {
    let board = require_board(pool, board_id).await?;
    if board.visibility == Visibility::Public || board.owner_user_id == user_id {
        return Ok(true);
    }

    Ok(find_collaborator(pool, board_id, user_id).await?.is_some())
}

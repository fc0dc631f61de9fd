/**
 * Invitation State Machine
 *
 * Per-board, per-invitee workflow: PENDING -> ACCEPTED | DECLINED |
 * IGNORED. Terminal states are immutable; re-responding is an error, not
 * an idempotent no-op. At most one PENDING invitation may exist for a
 * given (board, invitee) pair, backed by a partial unique index.
 *
 * Accepting materializes a Collaborator grant (upserting the permission
 * if a grant from a prior cycle exists) and idempotently marks the board
 * collaborative. Declining or ignoring withdraws the actionable
 * INVITATION_RECEIVED notification so it cannot go stale; it does NOT
 * remove a grant earned through an earlier acceptance.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::boards::db::{require_board, set_collaborative, upsert_collaborator};
use crate::backend::error::BackendError;
use crate::backend::notifications::db::{notify, withdraw_invitation_notification};
use crate::backend::social::blocks::ensure_not_blocked;
use crate::backend::users::db::find_user_by_username;
use crate::shared::{InvitationAction, InvitationStatus, NotificationType, Permission};

/// A board-collaboration invitation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invitation {
    pub id: String,
    pub board_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    #[sqlx(try_from = "String")]
    pub permission: Permission,
    #[sqlx(try_from = "String")]
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

const INVITATION_COLUMNS: &str = "id, board_id, from_user_id, to_user_id, permission, status, \
                                  message, created_at, responded_at";

/// Send a collaboration invitation
///
/// Only the board owner may invite. Emits a best-effort
/// INVITATION_RECEIVED notification to the invitee after the row commits.
///
/// # Errors
/// - `NotFound` if the invitee username or the board is unknown
/// - `Unauthorized` if the sender is not the board owner
/// - `SelfReference` if the owner invites themselves
/// - `Blocked` if a block relation exists between the pair
/// - `AlreadyExists` if a PENDING invitation for (board, invitee) exists
pub async fn send_invitation(
    pool: &SqlitePool,
    from_user_id: &str,
    board_id: &str,
    to_username: &str,
    permission: Permission,
    message: Option<&str>,
) -> Result<Invitation, BackendError> {
    let invitee = find_user_by_username(pool, to_username)
        .await?
        .ok_or_else(|| BackendError::not_found("user"))?;

    let board = require_board(pool, board_id).await?;
    if board.owner_user_id != from_user_id {
        return Err(BackendError::unauthorized(
            "only the board owner may send invitations",
        ));
    }
    if invitee.id == from_user_id {
        return Err(BackendError::self_reference("invite"));
    }
    ensure_not_blocked(pool, from_user_id, &invitee.id).await?;

    let mut tx = pool.begin().await?;

    let pending = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM invitations
        WHERE board_id = ? AND to_user_id = ? AND status = 'pending'
        "#,
    )
    .bind(board_id)
    .bind(&invitee.id)
    .fetch_one(&mut *tx)
    .await?;
    if pending > 0 {
        return Err(BackendError::already_exists("pending invitation"));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO invitations (id, board_id, from_user_id, to_user_id, permission,
                                 status, message, created_at, responded_at)
        VALUES (?, ?, ?, ?, ?, 'pending', ?, ?, NULL)
        "#,
    )
    .bind(&id)
    .bind(board_id)
    .bind(from_user_id)
    .bind(&invitee.id)
    .bind(permission.as_str())
    .bind(message)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| BackendError::unique_or_database("pending invitation", e))?;

    tx.commit().await?;

    notify(
        pool,
        &invitee.id,
        Some(from_user_id),
        NotificationType::InvitationReceived,
        &format!("You have been invited to collaborate on \"{}\"", board.title),
        Some(&id),
        Some("invitation"),
    )
    .await;

    Ok(Invitation {
        id,
        board_id: board_id.to_string(),
        from_user_id: from_user_id.to_string(),
        to_user_id: invitee.id,
        permission,
        status: InvitationStatus::Pending,
        message: message.map(|s| s.to_string()),
        created_at: now,
        responded_at: None,
    })
}

/// Respond to a pending invitation (accept / decline / ignore)
///
/// On accept: the invitation moves to ACCEPTED, the collaborator grant is
/// created (or its permission overwritten), the board is marked
/// collaborative, and the original sender gets a best-effort
/// INVITATION_ACCEPTED notification. On decline/ignore: the invitation
/// moves to its terminal state and the outstanding INVITATION_RECEIVED
/// notification is withdrawn in the same transaction.
///
/// # Errors
/// - `NotFound` if the invitation does not exist
/// - `Unauthorized` if the acting user is not the invitee
/// - `Blocked` if a block relation has appeared between the pair
/// - `InvalidState` if the invitation is no longer PENDING
pub async fn respond_to_invitation(
    pool: &SqlitePool,
    invitation_id: &str,
    acting_user_id: &str,
    action: InvitationAction,
) -> Result<Invitation, BackendError> {
    let invitation = get_invitation(pool, invitation_id)
        .await?
        .ok_or_else(|| BackendError::not_found("invitation"))?;

    if invitation.to_user_id != acting_user_id {
        return Err(BackendError::unauthorized(
            "only the invitee may respond to an invitation",
        ));
    }
    ensure_not_blocked(pool, &invitation.from_user_id, &invitation.to_user_id).await?;

    let next = action.resulting_status();
    if !invitation.status.can_transition_to(next) {
        return Err(BackendError::invalid_state(format!(
            "invitation is {}, not pending",
            invitation.status.as_str()
        )));
    }

    let now = Utc::now();
    let mut tx = pool.begin().await?;

    // Guard against a concurrent response racing us to the transition.
    let updated = sqlx::query(
        r#"
        UPDATE invitations
        SET status = ?, responded_at = ?
        WHERE id = ? AND status = 'pending'
        "#,
    )
    .bind(next.as_str())
    .bind(now)
    .bind(invitation_id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(BackendError::invalid_state(
            "invitation was already resolved",
        ));
    }

    match action {
        InvitationAction::Accept => {
            upsert_collaborator(
                &mut *tx,
                &invitation.board_id,
                &invitation.to_user_id,
                invitation.permission,
            )
            .await?;
            set_collaborative(&mut *tx, &invitation.board_id).await?;
        }
        InvitationAction::Decline | InvitationAction::Ignore => {
            // Withdraw the actionable notification so it cannot go stale.
            withdraw_invitation_notification(&mut *tx, invitation_id).await?;
        }
    }

    tx.commit().await?;

    if action == InvitationAction::Accept {
        notify(
            pool,
            &invitation.from_user_id,
            Some(&invitation.to_user_id),
            NotificationType::InvitationAccepted,
            "Your collaboration invitation was accepted",
            Some(invitation_id),
            Some("invitation"),
        )
        .await;
    }

    Ok(Invitation {
        status: next,
        responded_at: Some(now),
        ..invitation
    })
}

/// Cancel a pending invitation (hard delete)
///
/// # Errors
/// - `NotFound` if the invitation does not exist
/// - `Unauthorized` if the acting user is not the sender
/// - `InvalidState` if the invitation is no longer PENDING
pub async fn cancel_invitation(
    pool: &SqlitePool,
    invitation_id: &str,
    acting_user_id: &str,
) -> Result<(), BackendError> {
    let invitation = get_invitation(pool, invitation_id)
        .await?
        .ok_or_else(|| BackendError::not_found("invitation"))?;

    if invitation.from_user_id != acting_user_id {
        return Err(BackendError::unauthorized(
            "only the sender may cancel an invitation",
        ));
    }
    if invitation.status != InvitationStatus::Pending {
        return Err(BackendError::invalid_state(
            "cannot cancel a resolved invitation",
        ));
    }

    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM invitations WHERE id = ? AND status = 'pending'")
        .bind(invitation_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(BackendError::invalid_state(
            "invitation was already resolved",
        ));
    }

    // The invitee's actionable notification goes with the invitation.
    withdraw_invitation_notification(&mut *tx, invitation_id).await?;

    tx.commit().await?;

    Ok(())
}

/// Get an invitation by ID
pub async fn get_invitation(
    pool: &SqlitePool,
    invitation_id: &str,
) -> Result<Option<Invitation>, BackendError> {
    let invitation = sqlx::query_as::<_, Invitation>(&format!(
        "SELECT {} FROM invitations WHERE id = ?",
        INVITATION_COLUMNS
    ))
    .bind(invitation_id)
    .fetch_optional(pool)
    .await?;

    Ok(invitation)
}

/// List invitations received by a user, optionally filtered by status
pub async fn list_received(
    pool: &SqlitePool,
    user_id: &str,
    status: Option<InvitationStatus>,
) -> Result<Vec<Invitation>, BackendError> {
    list_for_user(pool, "to_user_id", user_id, status).await
}

/// List invitations sent by a user, optionally filtered by status
pub async fn list_sent(
    pool: &SqlitePool,
    user_id: &str,
    status: Option<InvitationStatus>,
) -> Result<Vec<Invitation>, BackendError> {
    list_for_user(pool, "from_user_id", user_id, status).await
}

async fn list_for_user(
    pool: &SqlitePool,
    column: &str,
    user_id: &str,
    status: Option<InvitationStatus>,
) -> Result<Vec<Invitation>, BackendError> {
    // `column` is one of two compile-time constants, never user input.
    let invitations = match status {
        Some(status) => {
            sqlx::query_as::<_, Invitation>(&format!(
                "SELECT {} FROM invitations WHERE {} = ? AND status = ? ORDER BY created_at DESC",
                INVITATION_COLUMNS, column
            ))
            .bind(user_id)
            .bind(status.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Invitation>(&format!(
                "SELECT {} FROM invitations WHERE {} = ? ORDER BY created_at DESC",
                INVITATION_COLUMNS, column
            ))
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(invitations)
}

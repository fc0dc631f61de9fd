/**
 * Notification Fan-out and Storage
 *
 * `notify` is the fire-and-forget producer called by the social,
 * invitation and interaction services after their primary transaction
 * commits. A failed append is logged and swallowed - it must never fail
 * the triggering operation.
 *
 * The consumer-side operations (list, unread count, mark-read,
 * mark-all-read, delete) are ownership-checked CRUD.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::NotificationType;

/// A notification row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: String,
    pub recipient_user_id: String,
    pub sender_user_id: Option<String>,
    #[sqlx(try_from = "String")]
    pub notification_type: NotificationType,
    pub message: String,
    pub entity_id: Option<String>,
    pub entity_type: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Append a notification, best-effort
///
/// Failures are logged and swallowed; callers never observe them.
pub async fn notify(
    pool: &SqlitePool,
    recipient_user_id: &str,
    sender_user_id: Option<&str>,
    notification_type: NotificationType,
    message: &str,
    entity_id: Option<&str>,
    entity_type: Option<&str>,
) {
    if let Err(e) = record(
        pool,
        recipient_user_id,
        sender_user_id,
        notification_type,
        message,
        entity_id,
        entity_type,
    )
    .await
    {
        tracing::warn!(
            "notification emission failed (type={}, recipient={}): {:?}",
            notification_type.as_str(),
            recipient_user_id,
            e
        );
    }
}

/// The fallible append behind `notify`
async fn record(
    pool: &SqlitePool,
    recipient_user_id: &str,
    sender_user_id: Option<&str>,
    notification_type: NotificationType,
    message: &str,
    entity_id: Option<&str>,
    entity_type: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, recipient_user_id, sender_user_id, notification_type,
                                   message, entity_id, entity_type, is_read, created_at, read_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, NULL)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(recipient_user_id)
    .bind(sender_user_id)
    .bind(notification_type.as_str())
    .bind(message)
    .bind(entity_id)
    .bind(entity_type)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete the outstanding INVITATION_RECEIVED notification for an
/// invitation (called when the invitation is declined, ignored or
/// cancelled, inside the same transaction)
pub async fn withdraw_invitation_notification<'c, E>(
    executor: E,
    invitation_id: &str,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        r#"
        DELETE FROM notifications
        WHERE entity_id = ? AND notification_type = 'invitation_received'
        "#,
    )
    .bind(invitation_id)
    .execute(executor)
    .await?;

    Ok(())
}

const NOTIFICATION_COLUMNS: &str = "id, recipient_user_id, sender_user_id, notification_type, \
                                    message, entity_id, entity_type, is_read, created_at, read_at";

/// List a user's notifications, newest first
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Notification>, BackendError> {
    let notifications = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {} FROM notifications WHERE recipient_user_id = ? ORDER BY created_at DESC",
        NOTIFICATION_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

/// Count a user's unread notifications
pub async fn unread_count(pool: &SqlitePool, user_id: &str) -> Result<i64, BackendError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE recipient_user_id = ? AND is_read = 0",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Mark one notification as read (ownership-checked)
///
/// # Errors
/// - `NotFound` if no notification with this id belongs to the user
pub async fn mark_read(
    pool: &SqlitePool,
    user_id: &str,
    notification_id: &str,
) -> Result<(), BackendError> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET is_read = 1, read_at = ?
        WHERE id = ? AND recipient_user_id = ?
        "#,
    )
    .bind(Utc::now())
    .bind(notification_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("notification"));
    }

    Ok(())
}

/// Mark all of a user's notifications as read; returns how many changed
pub async fn mark_all_read(pool: &SqlitePool, user_id: &str) -> Result<u64, BackendError> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET is_read = 1, read_at = ?
        WHERE recipient_user_id = ? AND is_read = 0
        "#,
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete one notification (ownership-checked)
///
/// # Errors
/// - `NotFound` if no notification with this id belongs to the user
pub async fn delete_notification(
    pool: &SqlitePool,
    user_id: &str,
    notification_id: &str,
) -> Result<(), BackendError> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = ? AND recipient_user_id = ?")
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("notification"));
    }

    Ok(())
}

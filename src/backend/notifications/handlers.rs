//! HTTP handlers for the notification consumer surface.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::db;

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// GET /api/notifications
pub async fn list_notifications(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<db::Notification>>, BackendError> {
    let notifications = db::list_for_user(&pool, &user.user_id).await?;
    Ok(Json(notifications))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UnreadCountResponse>, BackendError> {
    let unread = db::unread_count(&pool, &user.user_id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// POST /api/notifications/{notification_id}/read
pub async fn mark_read(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(notification_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    db::mark_read(&pool, &user.user_id, &notification_id).await?;
    Ok(Json(serde_json::json!({ "read": true })))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, BackendError> {
    let changed = db::mark_all_read(&pool, &user.user_id).await?;
    Ok(Json(serde_json::json!({ "read": changed })))
}

/// DELETE /api/notifications/{notification_id}
pub async fn delete_notification(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(notification_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    db::delete_notification(&pool, &user.user_id, &notification_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

//! HTTP handlers for pins and pin interactions.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::pins::db::{self, NewPin, Pin, PinUpdate};
use crate::backend::pins::interactions;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub board_id: String,
}

#[derive(Debug, Serialize)]
pub struct LikeStatusResponse {
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct SaveStatusResponse {
    pub saved: bool,
}

/// POST /api/pins
pub async fn create_pin(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(req): Json<NewPin>,
) -> Result<Json<Pin>, BackendError> {
    let pin = db::create_pin(&pool, &user.user_id, req).await?;
    Ok(Json(pin))
}

/// GET /api/pins/{pin_id}
pub async fn get_pin(
    State(pool): State<SqlitePool>,
    Path(pin_id): Path<String>,
) -> Result<Json<Pin>, BackendError> {
    let pin = db::require_pin(&pool, &pin_id).await?;
    Ok(Json(pin))
}

/// PATCH /api/pins/{pin_id}
pub async fn update_pin(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
    Json(req): Json<PinUpdate>,
) -> Result<Json<Pin>, BackendError> {
    let pin = db::update_pin(&pool, &user.user_id, &pin_id, req).await?;
    Ok(Json(pin))
}

/// DELETE /api/pins/{pin_id}
pub async fn delete_pin(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    db::delete_pin(&pool, &user.user_id, &pin_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// POST /api/pins/{pin_id}/like
pub async fn like_pin(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
) -> Result<Json<interactions::PinLike>, BackendError> {
    let like = interactions::like(&pool, &user.user_id, &pin_id).await?;
    Ok(Json(like))
}

/// DELETE /api/pins/{pin_id}/like
pub async fn unlike_pin(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    interactions::unlike(&pool, &user.user_id, &pin_id).await?;
    Ok(Json(serde_json::json!({ "unliked": true })))
}

/// GET /api/pins/{pin_id}/like
pub async fn like_status(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
) -> Result<Json<LikeStatusResponse>, BackendError> {
    let liked = interactions::is_liked(&pool, &user.user_id, &pin_id).await?;
    Ok(Json(LikeStatusResponse { liked }))
}

/// POST /api/pins/{pin_id}/save
pub async fn save_pin(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<Pin>, BackendError> {
    let clone = interactions::save(&pool, &user.user_id, &pin_id, &req.board_id).await?;
    Ok(Json(clone))
}

/// DELETE /api/pins/{pin_id}/save
pub async fn unsave_pin(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    interactions::unsave(&pool, &user.user_id, &pin_id).await?;
    Ok(Json(serde_json::json!({ "unsaved": true })))
}

/// GET /api/pins/{pin_id}/save
pub async fn save_status(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(pin_id): Path<String>,
) -> Result<Json<SaveStatusResponse>, BackendError> {
    let saved = interactions::is_saved(&pool, &user.user_id, &pin_id).await?;
    Ok(Json(SaveStatusResponse { saved }))
}

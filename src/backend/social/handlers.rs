//! HTTP handlers for the social graph (blocks and follows).

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::social::{blocks, follows};

#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    pub blocked_id: String,
}

#[derive(Debug, Serialize)]
pub struct BlockStatusResponse {
    pub blocked: bool,
    pub mutual: bool,
}

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct FollowStatusResponse {
    pub following: bool,
}

#[derive(Debug, Serialize)]
pub struct FollowStatsResponse {
    pub followers: i64,
    pub following: i64,
}

/// POST /api/blocks
pub async fn block_user(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(req): Json<BlockRequest>,
) -> Result<Json<blocks::BlockRelation>, BackendError> {
    let relation = blocks::block(&pool, &user.user_id, &req.blocked_id).await?;
    Ok(Json(relation))
}

/// DELETE /api/blocks/{user_id}
pub async fn unblock_user(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(blocked_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    blocks::unblock(&pool, &user.user_id, &blocked_id).await?;
    Ok(Json(serde_json::json!({ "unblocked": true })))
}

/// GET /api/blocks/{user_id}
pub async fn block_status(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(other_id): Path<String>,
) -> Result<Json<BlockStatusResponse>, BackendError> {
    let blocked = blocks::is_blocked(&pool, &user.user_id, &other_id).await?;
    let mutual = blocks::is_mutually_blocked(&pool, &user.user_id, &other_id).await?;
    Ok(Json(BlockStatusResponse { blocked, mutual }))
}

/// POST /api/follows
pub async fn follow_user(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(req): Json<FollowRequest>,
) -> Result<Json<follows::FollowEdge>, BackendError> {
    let edge = follows::follow(&pool, &user.user_id, &req.user_id).await?;
    Ok(Json(edge))
}

/// DELETE /api/follows/{user_id}
pub async fn unfollow_user(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(target_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    follows::unfollow(&pool, &user.user_id, &target_id).await?;
    Ok(Json(serde_json::json!({ "unfollowed": true })))
}

/// GET /api/follows/{user_id}
pub async fn follow_status(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(target_id): Path<String>,
) -> Result<Json<FollowStatusResponse>, BackendError> {
    let following = follows::is_following(&pool, &user.user_id, &target_id).await?;
    Ok(Json(FollowStatusResponse { following }))
}

/// GET /api/users/{user_id}/follow-stats
pub async fn follow_stats(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<Json<FollowStatsResponse>, BackendError> {
    let followers = follows::follower_count(&pool, &user_id).await?;
    let following = follows::following_count(&pool, &user_id).await?;
    Ok(Json(FollowStatsResponse {
        followers,
        following,
    }))
}

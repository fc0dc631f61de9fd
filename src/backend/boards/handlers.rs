//! HTTP handlers for boards, access checks and invitations.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::backend::boards::{access, db, invitations};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::{InvitationAction, InvitationStatus, Permission, Visibility};

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub can_edit: bool,
    pub can_view: bool,
}

#[derive(Debug, Deserialize)]
pub struct SendInvitationRequest {
    pub board_id: String,
    pub to_username: String,
    pub permission: Permission,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub action: InvitationAction,
}

#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<InvitationStatus>,
}

/// POST /api/boards
pub async fn create_board(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateBoardRequest>,
) -> Result<Json<db::Board>, BackendError> {
    let board = db::create_board(
        &pool,
        &user.user_id,
        &req.title,
        req.description.as_deref(),
        req.visibility,
    )
    .await?;
    Ok(Json(board))
}

/// GET /api/boards/{board_id}
pub async fn get_board(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<db::Board>, BackendError> {
    let board = db::require_board(&pool, &board_id).await?;
    if !access::can_view(&pool, &user.user_id, &board_id).await? {
        return Err(BackendError::unauthorized("board is private"));
    }
    Ok(Json(board))
}

/// GET /api/boards/{board_id}/access
pub async fn board_access(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<AccessResponse>, BackendError> {
    let can_edit = access::can_edit(&pool, &user.user_id, &board_id).await?;
    let can_view = access::can_view(&pool, &user.user_id, &board_id).await?;
    Ok(Json(AccessResponse { can_edit, can_view }))
}

/// GET /api/boards/{board_id}/collaborators
pub async fn board_collaborators(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<db::Collaborator>>, BackendError> {
    let board = db::require_board(&pool, &board_id).await?;
    if board.owner_user_id != user.user_id {
        return Err(BackendError::unauthorized(
            "only the board owner may list collaborators",
        ));
    }
    let collaborators = db::list_collaborators(&pool, &board_id).await?;
    Ok(Json(collaborators))
}

/// POST /api/invitations
pub async fn send_invitation(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(req): Json<SendInvitationRequest>,
) -> Result<Json<invitations::Invitation>, BackendError> {
    let invitation = invitations::send_invitation(
        &pool,
        &user.user_id,
        &req.board_id,
        &req.to_username,
        req.permission,
        req.message.as_deref(),
    )
    .await?;
    Ok(Json(invitation))
}

/// POST /api/invitations/{invitation_id}/respond
pub async fn respond_to_invitation(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(invitation_id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<invitations::Invitation>, BackendError> {
    let invitation =
        invitations::respond_to_invitation(&pool, &invitation_id, &user.user_id, req.action)
            .await?;
    Ok(Json(invitation))
}

/// DELETE /api/invitations/{invitation_id}
pub async fn cancel_invitation(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(invitation_id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    invitations::cancel_invitation(&pool, &invitation_id, &user.user_id).await?;
    Ok(Json(serde_json::json!({ "cancelled": true })))
}

/// GET /api/invitations/{invitation_id}
pub async fn get_invitation(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(invitation_id): Path<String>,
) -> Result<Json<invitations::Invitation>, BackendError> {
    let invitation = invitations::get_invitation(&pool, &invitation_id)
        .await?
        .ok_or_else(|| BackendError::not_found("invitation"))?;
    if invitation.from_user_id != user.user_id && invitation.to_user_id != user.user_id {
        return Err(BackendError::unauthorized(
            "invitation belongs to another user",
        ));
    }
    Ok(Json(invitation))
}

/// GET /api/invitations/received?status=pending
pub async fn list_received(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<invitations::Invitation>>, BackendError> {
    let list = invitations::list_received(&pool, &user.user_id, filter.status).await?;
    Ok(Json(list))
}

/// GET /api/invitations/sent?status=pending
pub async fn list_sent(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<invitations::Invitation>>, BackendError> {
    let list = invitations::list_sent(&pool, &user.user_id, filter.status).await?;
    Ok(Json(list))
}

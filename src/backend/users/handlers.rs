//! HTTP handlers for user provisioning and lookup.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::users::db::{self, User};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

/// POST /api/users - provision a user mirrored from the identity store
pub async fn create_user(
    State(pool): State<SqlitePool>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, BackendError> {
    let user = db::create_user(&pool, &req.username).await?;
    Ok(Json(user))
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, BackendError> {
    let user = db::require_user(&pool, &user_id).await?;
    Ok(Json(user))
}

/**
 * Authentication Middleware
 *
 * Token issuance and verification live in an external identity service;
 * by the time a request reaches this backend the gateway has resolved the
 * caller and forwards their ID in the `X-User-Id` header. This middleware
 * verifies the referenced user exists and is active, then attaches the
 * acting user to request extensions for handlers to extract.
 *
 * Returns 401 Unauthorized if the header is missing or the user is
 * unknown or deactivated.
 */

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::backend::server::state::AppState;
use crate::backend::users::db::find_user_by_id;

/// Header carrying the upstream-resolved acting user
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user data resolved from the request
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the acting user ID from the `X-User-Id` header
/// 2. Verifies the user exists and is active
/// 3. Attaches user data to request extensions for use in handlers
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            tracing::warn!("Missing {} header", USER_ID_HEADER);
            StatusCode::UNAUTHORIZED
        })?;

    let user = find_user_by_id(&app_state.db_pool, &user_id)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            tracing::warn!("Unknown acting user: {}", user_id);
            StatusCode::UNAUTHORIZED
        })?;

    if !user.is_active {
        tracing::warn!("Deactivated user attempted request: {}", user_id);
        return Err(StatusCode::UNAUTHORIZED);
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Use as a handler parameter to get the acting user attached by
/// `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(user))
    }
}

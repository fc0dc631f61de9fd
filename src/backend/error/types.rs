/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the backend services. Every
 * failure a service can surface is a distinguishable kind so the HTTP
 * layer can map it to appropriate status semantics.
 *
 * # Error Categories
 *
 * - `SelfReference` - blocking or following yourself
 * - `AlreadyExists` - duplicate block/follow/like/save/pending-invitation
 * - `NotFound` - missing user/board/pin/invitation/like/save relation
 * - `Unauthorized` - actor lacks ownership, permission or an EDIT grant
 * - `Blocked` - a mutual block suppresses the operation
 * - `InvalidState` - responding to or cancelling a non-PENDING invitation
 * - `MissingInput` - required input absent (e.g. save without a board)
 * - `Database` - underlying sqlx failure
 *
 * Notification emission failures are deliberately NOT represented here:
 * they are recovered locally (logged and swallowed) and never surfaced.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// Each variant carries enough context for a useful message and maps to a
/// single HTTP status code via [`BackendError::status_code`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// The actor targeted themselves (self-block, self-follow)
    #[error("cannot {action} yourself")]
    SelfReference { action: &'static str },

    /// A uniqueness invariant would be violated
    #[error("{what} already exists")]
    AlreadyExists { what: &'static str },

    /// The referenced entity or relation does not exist
    #[error("{what} not found")]
    NotFound { what: &'static str },

    /// The actor lacks ownership or the required permission
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// A block relation exists between the pair, in either direction
    #[error("operation not permitted between blocked users")]
    Blocked,

    /// A state-machine transition that the transition table rejects
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// A required input was empty or absent
    #[error("missing required input: {field}")]
    MissingInput { field: &'static str },

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a self-reference error, e.g. `BackendError::self_reference("follow")`
    pub fn self_reference(action: &'static str) -> Self {
        Self::SelfReference { action }
    }

    /// Create an already-exists error for the named relation
    pub fn already_exists(what: &'static str) -> Self {
        Self::AlreadyExists { what }
    }

    /// Create a not-found error for the named entity
    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound { what }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an invalid-state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a missing-input error for the named field
    pub fn missing_input(field: &'static str) -> Self {
        Self::MissingInput { field }
    }

    /// Classify an insert failure against a uniqueness invariant
    ///
    /// A unique-constraint violation means a concurrent request created
    /// the relation between our existence check and the insert, so the
    /// caller still gets `AlreadyExists` rather than a raw database
    /// error. Anything else stays `Database`.
    pub fn unique_or_database(what: &'static str, error: sqlx::Error) -> Self {
        match error.as_database_error() {
            Some(db) if db.is_unique_violation() => Self::already_exists(what),
            _ => Self::Database(error),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `SelfReference` / `MissingInput` - 400 Bad Request
    /// - `NotFound` - 404 Not Found
    /// - `AlreadyExists` / `InvalidState` - 409 Conflict
    /// - `Unauthorized` / `Blocked` - 403 Forbidden
    /// - `Database` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::SelfReference { .. } => StatusCode::BAD_REQUEST,
            Self::MissingInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::InvalidState { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::Blocked => StatusCode::FORBIDDEN,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

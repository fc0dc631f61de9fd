//! HTTP middleware.

pub mod auth;

pub use auth::{AuthUser, AuthenticatedUser, USER_ID_HEADER};

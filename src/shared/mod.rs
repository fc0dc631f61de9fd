//! Shared types used across the backend services and the HTTP surface.

pub mod notifications;
pub mod social;

pub use notifications::NotificationType;
pub use social::{InvitationAction, InvitationStatus, Permission, Visibility};

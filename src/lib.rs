//! Pinboard - Main Library
//!
//! Pinboard is a social pinboard platform backend built with Rust: users
//! create boards, pin images into them, follow each other, collaborate on
//! shared boards by invitation, like and save pins, and receive
//! notifications.
//!
//! # Overview
//!
//! The hard core of the service is the collaborative-access and
//! interaction-consistency subsystem:
//!
//! - A board-collaboration invitation state machine that grants cross-user
//!   write permissions (PENDING -> ACCEPTED | DECLINED | IGNORED, with a
//!   Collaborator grant materialized on acceptance)
//! - A pin interaction model (like / copy-on-save) that keeps denormalized
//!   counters consistent and triggers notification side effects
//! - A directional block relation that gates every social operation in
//!   either direction
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Platform-agnostic types
//!   - Visibility, permission and invitation-status enums
//!   - The invitation transition table
//!   - Notification type definitions
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, route wiring and auth middleware
//!   - Social graph (blocks, follows), board collaboration, pin
//!     interactions and notification fan-out services
//!   - SQLite persistence via sqlx with per-operation transactions
//!
//! # Usage
//!
//! ```rust,no_run
//! use pinboard::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await.expect("server init");
//! // Use app with axum::serve
//! # }
//! ```
//!
//! # Consistency Model
//!
//! Every state-changing operation (block/unblock, follow/unfollow,
//! invitation send/respond/cancel, like/unlike, save/unsave) runs as a
//! single transaction: the existence check, the relation-row mutation and
//! the counter adjustment commit together. Counter updates are atomic
//! in-place SQL updates, never application-level read-modify-write.
//! Notification emission happens after the commit and its failure is
//! logged and swallowed, never propagated.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

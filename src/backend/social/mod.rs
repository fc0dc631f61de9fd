//! Social graph: the Block Registry and the Follow Graph.
//!
//! The block guard in [`blocks`] is the single cross-cutting check every
//! social and collaboration operation calls before proceeding.

pub mod blocks;
pub mod follows;
pub mod handlers;

pub use blocks::{block, ensure_not_blocked, is_blocked, is_mutually_blocked, unblock};
pub use follows::{follow, follower_count, following_count, is_following, unfollow};

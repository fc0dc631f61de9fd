//! Identity mirror: local lookup of users resolved by the external
//! identity store.

pub mod db;
pub mod handlers;

pub use db::{create_user, find_user_by_id, find_user_by_username, User};

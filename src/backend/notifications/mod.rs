//! Notification fan-out and the consumer-side CRUD surface.

pub mod db;
pub mod handlers;

pub use db::{notify, Notification};

//! Pins: CRUD gated by the board access policy, and the like/save
//! interaction engine with its counter-consistency guarantees.

pub mod db;
pub mod handlers;
pub mod interactions;

pub use db::Pin;
pub use interactions::{is_liked, is_saved, like, save, unlike, unsave};

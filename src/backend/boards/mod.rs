//! Boards, collaborator grants, the access policy and the invitation
//! state machine.

pub mod access;
pub mod db;
pub mod handlers;
pub mod invitations;

pub use access::{can_edit, can_view};
pub use db::{Board, Collaborator};
pub use invitations::Invitation;

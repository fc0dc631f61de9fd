//! Backend server-side code.
//!
//! Each domain module pairs its service/database functions with a thin
//! `handlers` module that maps HTTP requests onto them. All cross-user
//! operations call the block guard in [`social::blocks`] before touching
//! their own state.

pub mod boards;
pub mod error;
pub mod middleware;
pub mod notifications;
pub mod pins;
pub mod routes;
pub mod server;
pub mod social;
pub mod users;

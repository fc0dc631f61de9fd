//! Server setup: configuration, application state and app construction.

pub mod config;
pub mod init;
pub mod state;

//! Backend error handling.
//!
//! `types` defines the error taxonomy; `conversion` maps it onto HTTP
//! responses so handlers can return `Result<_, BackendError>` directly.

pub mod conversion;
pub mod types;

pub use types::BackendError;

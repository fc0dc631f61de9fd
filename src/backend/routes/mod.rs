//! Route wiring.

pub mod api_routes;
pub mod router;

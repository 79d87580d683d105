//! HTTP adapter for workspace and membership endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::workspace_routes;

//! Adapters - implementations of the ports.
//!
//! - `auth` - session validation (JWT, plus a mock for tests)
//! - `http` - axum routes, middleware, and DTOs
//! - `memory` - in-memory stores for tests and local development
//! - `postgres` - sqlx-backed persistence
//! - `redis` - last-used workspace recall
//! - `stripe` - payment provider integration

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod redis;
pub mod stripe;

//! Workroom - Multi-tenant SaaS scaffold.
//!
//! Implements workspace-scoped access control and billing-state
//! synchronization with an external payment provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

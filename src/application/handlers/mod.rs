//! Command handlers.
//!
//! Each handler wires ports together to execute one operation. Handlers
//! hold `Arc<dyn Port>` references and contain no storage or transport
//! code of their own.

pub mod billing;
pub mod tenancy;

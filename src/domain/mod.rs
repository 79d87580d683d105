//! Domain layer - pure business types and rules.
//!
//! No I/O happens here; everything that touches the outside world goes
//! through the ports layer.

pub mod billing;
pub mod foundation;
pub mod tenancy;

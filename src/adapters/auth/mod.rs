//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `oidc` - production OIDC implementation (JWKS-based JWT validation)
//! - `mock` - test implementation that needs no external service

mod mock;
mod oidc;

pub use mock::MockSessionValidator;
pub use oidc::{OidcConfig, OidcSessionValidator};

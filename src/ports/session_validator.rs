//! Session validation port.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Port for validating session tokens against the identity provider.
///
/// Implementations verify the token's signature and expiry and map the
/// provider's claims onto a domain `AuthenticatedUser`.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a bearer token and returns the authenticated user.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` for a bad signature or malformed token
    /// - `TokenExpired` when the token's expiry has passed
    /// - `ServiceUnavailable` when validation could not be attempted
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

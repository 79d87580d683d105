//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (OIDC identity provider)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OIDC issuer URL (JWKS discovery and issuer validation)
    pub issuer_url: String,

    /// Expected audience for tokens
    pub audience: String,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production requires HTTPS for the issuer; development allows
    /// plain HTTP for local identity providers.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.issuer_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH issuer_url"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH audience"));
        }

        if *environment == Environment::Production && !self.issuer_url.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: String::new(),
            audience: String::new(),
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

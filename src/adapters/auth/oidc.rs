//! OIDC adapter for JWT validation.
//!
//! Implements the `SessionValidator` port against any OIDC-compliant
//! identity provider. Validates JWTs by:
//!
//! 1. Fetching JWKS from the issuer's well-known endpoint
//! 2. Validating the JWT signature against the published keys
//! 3. Validating issuer, audience, and expiry claims
//! 4. Mapping claims to the domain `AuthenticatedUser` type

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the OIDC adapter.
#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Issuer URL, used for JWKS discovery and issuer validation.
    pub issuer_url: String,

    /// Expected audience claim; tokens without it are rejected.
    pub audience: String,

    /// How long to cache JWKS before refetching. Defaults to 1 hour.
    pub jwks_cache_duration: Option<Duration>,
}

impl OidcConfig {
    pub fn new(issuer_url: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: audience.into(),
            jwks_cache_duration: None,
        }
    }

    /// Sets a custom JWKS cache duration.
    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = Some(duration);
        self
    }

    fn jwks_url(&self) -> String {
        format!(
            "{}/.well-known/jwks.json",
            self.issuer_url.trim_end_matches('/')
        )
    }
}

/// JWT claims we read from provider tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject - the user id.
    sub: String,

    /// Issuer URL.
    iss: String,

    /// Audience - single string or array.
    #[serde(default)]
    aud: Audience,

    /// Expiry timestamp (Unix epoch seconds).
    exp: i64,

    /// User's email address.
    #[serde(default)]
    email: Option<String>,

    /// User's display name.
    #[serde(default)]
    name: Option<String>,

    /// User's preferred username.
    #[serde(default)]
    preferred_username: Option<String>,
}

/// Audience can be a single string or an array of strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Cached JWKS with expiry tracking.
struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

/// OIDC session validator.
///
/// This is the production implementation of `SessionValidator`.
pub struct OidcSessionValidator {
    config: OidcConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl OidcSessionValidator {
    /// Creates a new validator.
    ///
    /// Keys are fetched lazily on first validation, not at startup.
    pub fn new(config: OidcConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();

        tracing::debug!("Fetching JWKS from {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("JWKS endpoint returned {}", status);
            return Err(AuthError::ServiceUnavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to parse JWKS: {}", e))
        })?;

        Ok(jwks)
    }

    /// Gets JWKS, using the cache when it has not expired.
    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.jwks_cache.write().await;
            let duration = self
                .config
                .jwks_cache_duration
                .unwrap_or(Duration::from_secs(3600));
            *cache = Some(JwksCache::new(jwks.clone(), duration));
        }

        Ok(jwks)
    }

    /// Finds the decoding key matching the JWT's `kid` header.
    fn find_decoding_key(
        &self,
        header: &jsonwebtoken::Header,
        jwks: &JwkSet,
    ) -> Result<(DecodingKey, Algorithm), AuthError> {
        let kid = header.kid.as_ref().ok_or_else(|| {
            tracing::warn!("JWT missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let jwk = jwks.find(kid).ok_or_else(|| {
            tracing::warn!("No matching key found for kid: {}", kid);
            AuthError::InvalidToken
        })?;

        let algorithm = match jwk.common.key_algorithm {
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS256) => Algorithm::RS256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(jsonwebtoken::jwk::KeyAlgorithm::ES256) => Algorithm::ES256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::ES384) => Algorithm::ES384,
            Some(other) => {
                tracing::warn!("Unsupported algorithm: {:?}", other);
                return Err(AuthError::InvalidToken);
            }
            // Default to RS256 if not specified (common for OIDC)
            None => Algorithm::RS256,
        };

        let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!("Failed to create decoding key: {}", e);
            AuthError::InvalidToken
        })?;

        Ok((decoding_key, algorithm))
    }

    fn validate_token(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer_url]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<Claims>(token, decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

#[async_trait]
impl SessionValidator for OidcSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode JWT header: {}", e);
            AuthError::InvalidToken
        })?;

        let jwks = self.get_jwks().await?;
        let (decoding_key, algorithm) = self.find_decoding_key(&header, &jwks)?;
        let token_data = self.validate_token(token, &decoding_key, algorithm)?;
        let claims = token_data.claims;

        // Issuer and audience again, independent of the library's checks
        if claims.iss != self.config.issuer_url {
            tracing::warn!("Issuer mismatch after validation");
            return Err(AuthError::InvalidToken);
        }
        if !claims.aud.contains(&self.config.audience) {
            tracing::warn!("Audience mismatch after validation");
            return Err(AuthError::InvalidToken);
        }

        let email = claims.email.ok_or_else(|| {
            tracing::warn!("Token missing email claim");
            AuthError::InvalidToken
        })?;

        let user_id = UserId::new(&claims.sub).ok_or_else(|| {
            tracing::warn!("Empty subject in token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(
            user_id,
            email,
            claims.name.or(claims.preferred_username),
        ))
    }
}

impl std::fmt::Debug for OidcSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

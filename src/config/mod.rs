//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `WORKROOM` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use workroom::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod redis;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Redis configuration (workspace recall)
    pub redis: RedisConfig,

    /// Authentication configuration (OIDC)
    pub auth: AuthConfig,

    /// Payment configuration (Stripe)
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the
    /// `WORKROOM` prefix. Nested values use `__`:
    ///
    /// - `WORKROOM__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WORKROOM__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("WORKROOM").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize these tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("WORKROOM__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("WORKROOM__REDIS__URL", "redis://localhost:6379");
        env::set_var("WORKROOM__AUTH__ISSUER_URL", "https://auth.example.com");
        env::set_var("WORKROOM__AUTH__AUDIENCE", "workroom-api");
        env::set_var("WORKROOM__PAYMENT__STRIPE_API_KEY", "sk_test_abc");
        env::set_var("WORKROOM__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_abc");
        env::set_var("WORKROOM__PAYMENT__STRIPE_PRO_PRICE_ID", "price_pro");
    }

    fn clear_env() {
        for key in [
            "WORKROOM__DATABASE__URL",
            "WORKROOM__REDIS__URL",
            "WORKROOM__AUTH__ISSUER_URL",
            "WORKROOM__AUTH__AUDIENCE",
            "WORKROOM__PAYMENT__STRIPE_API_KEY",
            "WORKROOM__PAYMENT__STRIPE_WEBHOOK_SECRET",
            "WORKROOM__PAYMENT__STRIPE_PRO_PRICE_ID",
            "WORKROOM__SERVER__PORT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();

        let config = AppConfig::load().unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.auth.audience, "workroom-api");
        assert!(config.validate().is_ok());

        clear_env();
    }

    #[test]
    fn nested_overrides_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WORKROOM__SERVER__PORT", "3000");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 3000);

        clear_env();
    }
}

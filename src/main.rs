//! Workroom server entry point.
//!
//! Bootstrap only: configuration, tracing, adapter wiring, and the
//! axum server loop. All routes and business logic live in the
//! library crate.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use workroom::adapters::auth::{OidcConfig, OidcSessionValidator};
use workroom::adapters::http::{api_router, AppState};
use workroom::adapters::postgres::{
    PostgresEventLedger, PostgresMembershipStore, PostgresWorkspaceStore,
};
use workroom::adapters::redis::RedisWorkspaceRecall;
use workroom::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use workroom::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!().run(&pool).await?;
    }

    let redis_conn = redis::Client::open(config.redis.url.as_str())?
        .get_multiplexed_tokio_connection()
        .await?;

    let mut oidc_config = OidcConfig::new(&config.auth.issuer_url, &config.auth.audience);
    oidc_config.jwks_cache_duration = Some(config.auth.jwks_cache_ttl());
    let session_validator = OidcSessionValidator::new(oidc_config)?;

    let stripe = StripePaymentAdapter::new(StripeConfig::new(
        &config.payment.stripe_api_key,
        &config.payment.stripe_webhook_secret,
        &config.payment.stripe_pro_price_id,
    ));

    let state = AppState {
        session_validator: Arc::new(session_validator),
        workspace_store: Arc::new(PostgresWorkspaceStore::new(pool.clone())),
        membership_store: Arc::new(PostgresMembershipStore::new(pool.clone())),
        event_ledger: Arc::new(PostgresEventLedger::new(pool)),
        payment_provider: Arc::new(stripe),
        workspace_recall: Arc::new(RedisWorkspaceRecall::new(redis_conn)),
    };

    let app = Router::new()
        .route("/health", get(health))
        .merge(api_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_cors(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

//! Authentication middleware and extractors for axum.
//!
//! The middleware validates Bearer tokens through the `SessionValidator`
//! port and injects the resulting `AuthenticatedUser` into request
//! extensions. Handlers opt in with the `RequireAuth` extractor; routes
//! where identity is optional use `OptionalAuth`.
//!
//! Workspace-scoped routes do not use this layer. Their guard resolves
//! the session itself so the whole access decision runs in one place.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

use super::super::error::ErrorResponse;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates the Bearer token and injects `AuthenticatedUser`.
///
/// A missing token continues without injecting, so routes with optional
/// identity still work; `RequireAuth` turns the absence into a 401. An
/// invalid token is rejected immediately.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&request);

    match token {
        Some(token) => match validator.validate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("Auth service unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                };

                let body = ErrorResponse::new("UNAUTHENTICATED", message);
                (status, Json(body)).into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Extractor that requires an authenticated user in the extensions.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for optional authentication.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Ok(OptionalAuth(
                parts.extensions.get::<AuthenticatedUser>().cloned(),
            ))
        })
    }
}

/// Rejection returned when authentication is required but absent.
#[derive(Debug)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("UNAUTHENTICATED", "Authentication required");
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;

    async fn whoami(RequireAuth(user): RequireAuth) -> String {
        user.email
    }

    fn app(validator: Arc<dyn SessionValidator>) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(
                validator,
                auth_middleware,
            ))
    }

    fn request(token: Option<&str>) -> axum::http::Request<Body> {
        let builder = axum::http::Request::builder().uri("/whoami");
        let builder = match token {
            Some(t) => builder.header("Authorization", format!("Bearer {}", t)),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler() {
        let validator = Arc::new(MockSessionValidator::accepting(
            "token-1",
            UserId::new("user-1").unwrap(),
        ));

        let response = app(validator).oneshot(request(Some("token-1"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected() {
        let validator = Arc::new(MockSessionValidator::accepting(
            "token-1",
            UserId::new("user-1").unwrap(),
        ));

        let response = app(validator).oneshot(request(Some("wrong"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_token_fails_at_the_extractor() {
        let validator = Arc::new(MockSessionValidator::accepting(
            "token-1",
            UserId::new("user-1").unwrap(),
        ));

        let response = app(validator).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

//! Workspace guard middleware.
//!
//! Wraps workspace-scoped routes. The guard hands the Bearer token and
//! the `:workspace_id` path segment to the access resolver and injects
//! the resulting `AccessContext` into request extensions for the
//! duration of that single request.
//!
//! Denial mapping: no valid session is 401; everything else is one
//! uniform 404, so a non-member response is indistinguishable from a
//! workspace that does not exist.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::tenancy::{ResolveAccessCommand, ResolveAccessHandler};
use crate::domain::tenancy::{AccessContext, AccessDenied, Role};

use super::super::error::{ApiError, ErrorResponse};
use super::auth::bearer_token;

/// State for the workspace guard: the resolver plus the minimum role
/// this particular layer demands.
#[derive(Clone)]
pub struct WorkspaceGuard {
    resolver: Arc<ResolveAccessHandler>,
    minimum_role: Role,
}

impl WorkspaceGuard {
    pub fn new(resolver: Arc<ResolveAccessHandler>, minimum_role: Role) -> Self {
        Self {
            resolver,
            minimum_role,
        }
    }
}

/// Resolves workspace access before the wrapped route runs.
///
/// Routes under this layer can rely on `WorkspaceAccess` being present.
pub async fn workspace_guard(
    State(guard): State<WorkspaceGuard>,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Response {
    // Malformed ids get the same uniform 404 as unknown ones.
    let workspace_id = match params.get("workspace_id").and_then(|raw| raw.parse().ok()) {
        Some(id) => id,
        None => return ApiError::not_found(),
    };

    let cmd = ResolveAccessCommand {
        token: bearer_token(&request),
        workspace_id,
        minimum_role: guard.minimum_role,
    };

    match guard.resolver.handle(cmd).await {
        Ok(access) => {
            request.extensions_mut().insert(access);
            next.run(request).await
        }
        Err(AccessDenied::Unauthenticated) => {
            let body = ErrorResponse::new("UNAUTHENTICATED", "Authentication required");
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
        Err(AccessDenied::NotFound) | Err(AccessDenied::Forbidden) => ApiError::not_found(),
    }
}

/// Extractor for the access context injected by the guard.
#[derive(Debug, Clone)]
pub struct WorkspaceAccess(pub AccessContext);

impl<S> axum::extract::FromRequestParts<S> for WorkspaceAccess
where
    S: Send + Sync,
{
    type Rejection = GuardMissing;

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
                .get::<AccessContext>()
                .cloned()
                .map(WorkspaceAccess)
                .ok_or(GuardMissing)
        })
    }
}

/// Rejection when a route expected the guard but no context was set.
/// Reaching this is a wiring bug, not a client error.
#[derive(Debug)]
pub struct GuardMissing;

impl IntoResponse for GuardMissing {
    fn into_response(self) -> Response {
        tracing::error!("access context missing; workspace guard layer not applied");
        let body = ErrorResponse::new("INTERNAL_ERROR", "Internal server error");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

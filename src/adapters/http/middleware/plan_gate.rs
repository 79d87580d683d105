//! Plan gate middleware.
//!
//! Composed after the workspace guard: it reads the `AccessContext`
//! the guard injected and rejects when the workspace's plan does not
//! cover the route's requirement.
//!
//! The reject style is declared by whoever mounts the layer. API
//! surfaces get a structured 402; page surfaces get a redirect to the
//! upgrade entry point. The style is never inferred from the request.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::domain::tenancy::{gate_plan, AccessContext, Plan, PlanDecision};

use super::super::error::ErrorResponse;

/// How a gated route turns `PaymentRequired` into a response.
#[derive(Debug, Clone)]
pub enum RejectStyle {
    /// Structured callers receive `402 Payment Required` with the
    /// usual error envelope.
    Structured,
    /// Page callers are redirected (303) to the upgrade entry point.
    Redirect { upgrade_url: String },
}

/// State for the plan gate layer.
#[derive(Debug, Clone)]
pub struct PlanGate {
    required: Plan,
    style: RejectStyle,
}

impl PlanGate {
    pub fn structured(required: Plan) -> Self {
        Self {
            required,
            style: RejectStyle::Structured,
        }
    }

    pub fn redirect(required: Plan, upgrade_url: impl Into<String>) -> Self {
        Self {
            required,
            style: RejectStyle::Redirect {
                upgrade_url: upgrade_url.into(),
            },
        }
    }
}

/// Rejects or redirects when the resolved plan lacks the requirement.
pub async fn plan_gate(State(gate): State<PlanGate>, request: Request, next: Next) -> Response {
    let Some(access) = request.extensions().get::<AccessContext>() else {
        tracing::error!("plan gate reached without an access context; guard layer missing");
        let body = ErrorResponse::new("INTERNAL_ERROR", "Internal server error");
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    };

    match gate_plan(access.plan, gate.required) {
        PlanDecision::Allowed => next.run(request).await,
        PlanDecision::PaymentRequired => match &gate.style {
            RejectStyle::Structured => {
                let body = ErrorResponse::new(
                    "PAYMENT_REQUIRED",
                    "This feature requires an upgraded plan",
                );
                (StatusCode::PAYMENT_REQUIRED, Json(body)).into_response()
            }
            RejectStyle::Redirect { upgrade_url } => Redirect::to(upgrade_url).into_response(),
        },
    }
}

//! HTTP handlers for billing endpoints.
//!
//! The webhook handler acknowledges everything the ingest handler
//! classifies, including events it cannot map to a workspace; only
//! verification and infrastructure failures produce error statuses.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::billing::{
    IngestBillingEventCommand, IngestOutcome, StartCheckoutCommand,
};
use crate::domain::billing::BillingError;
use crate::domain::tenancy::Plan;
use crate::ports::PaymentError;

use super::super::error::ErrorResponse;
use super::super::middleware::{RequireAuth, WorkspaceAccess};
use super::super::state::AppState;
use super::dto::{
    CheckoutResponse, ConfirmCheckoutRequest, ConfirmCheckoutResponse, StartCheckoutRequest,
    WebhookAckResponse,
};

/// POST /api/billing/workspaces/:workspace_id/checkout - Start an upgrade checkout (admin)
pub async fn start_checkout(
    State(state): State<AppState>,
    WorkspaceAccess(access): WorkspaceAccess,
    Json(request): Json<StartCheckoutRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    // Starting a second subscription for an upgraded workspace would
    // double-charge the customer.
    if access.plan == Plan::Pro {
        return Err(BillingApiError::AlreadyOnPlan);
    }

    let handler = state.start_checkout_handler();
    let cmd = StartCheckoutCommand {
        workspace_id: access.workspace_id,
        email: access.user.email.clone(),
        success_url: request.success_url,
        cancel_url: request.cancel_url,
    };

    let session = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(session))))
}

/// POST /api/billing/confirm - Confirm a checkout by its session token
pub async fn confirm_checkout(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<ConfirmCheckoutRequest>,
) -> Json<ConfirmCheckoutResponse> {
    let handler = state.confirm_checkout_handler();
    let workspace_id = handler.handle(&request.session_token).await;

    Json(ConfirmCheckoutResponse {
        confirmed: workspace_id.is_some(),
        workspace_id: workspace_id.map(|id| id.to_string()),
    })
}

/// POST /api/webhooks/billing - Ingest a signed billing event
pub async fn handle_billing_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = match headers.get("Stripe-Signature").and_then(|v| v.to_str().ok()) {
        Some(s) => s.to_string(),
        None => {
            let body = ErrorResponse::new("VALIDATION_FAILED", "Missing Stripe-Signature header");
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let handler = state.ingest_billing_event_handler();
    let cmd = IngestBillingEventCommand {
        payload: body.to_vec(),
        signature,
    };

    match handler.handle(cmd).await {
        Ok(outcome) => {
            let status = match outcome {
                IngestOutcome::Applied => "applied",
                IngestOutcome::AlreadyProcessed => "duplicate",
                IngestOutcome::Unmapped => "ignored",
            };
            (StatusCode::OK, Json(WebhookAckResponse { status })).into_response()
        }
        Err(e) => {
            let (code, message) = match &e {
                BillingError::InvalidSignature
                | BillingError::TimestampOutOfRange
                | BillingError::InvalidTimestamp => {
                    ("VERIFICATION_FAILED", e.to_string())
                }
                BillingError::ParseError(_) | BillingError::MissingField(_) => {
                    ("VALIDATION_FAILED", e.to_string())
                }
                BillingError::Database(_) | BillingError::Provider(_) => {
                    tracing::error!(error = %e, "webhook ingestion failed");
                    ("INTERNAL_ERROR", "Internal server error".to_string())
                }
            };
            let body = ErrorResponse::new(code, message);
            (e.status_code(), Json(body)).into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for the checkout endpoints.
pub enum BillingApiError {
    /// The workspace already holds the plan the checkout would buy.
    AlreadyOnPlan,
    /// The payment provider refused or could not be reached.
    Provider(PaymentError),
}

impl From<PaymentError> for BillingApiError {
    fn from(err: PaymentError) -> Self {
        Self::Provider(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            BillingApiError::AlreadyOnPlan => (
                StatusCode::CONFLICT,
                "ALREADY_ON_PLAN",
                "Workspace is already on this plan".to_string(),
            ),
            BillingApiError::Provider(PaymentError::Rejected(msg)) => {
                (StatusCode::BAD_GATEWAY, "CHECKOUT_REJECTED", msg)
            }
            BillingApiError::Provider(PaymentError::VerificationFailed(_)) => (
                StatusCode::UNAUTHORIZED,
                "VERIFICATION_FAILED",
                "Verification failed".to_string(),
            ),
            BillingApiError::Provider(PaymentError::Unavailable(msg)) => {
                tracing::error!("payment provider unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PAYMENT_PROVIDER_UNAVAILABLE",
                    "Payment provider unavailable".to_string(),
                )
            }
        };

        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

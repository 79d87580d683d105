//! Billing event types delivered by the payment provider.
//!
//! Only fields relevant to our processing are captured; the rest of the
//! provider's event schema is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::EventId;

/// A verified billing event (simplified provider schema).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEvent {
    /// Provider-assigned event identifier (`evt_...`). Uniqueness in the
    /// event ledger is keyed on this value.
    pub id: EventId,

    /// Raw event type string (e.g. "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the provider created the event (Unix timestamp).
    pub created: i64,

    /// Event-specific data.
    pub data: BillingEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEventData {
    /// The object that triggered the event; shape depends on event type.
    pub object: serde_json::Value,
}

impl BillingEvent {
    /// Parses the raw type string into a known event type.
    pub fn parsed_type(&self) -> BillingEventType {
        BillingEventType::parse(&self.event_type)
    }

    /// Attempts to deserialize the data object as the given type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Event types with a mapped plan effect.
///
/// Anything else parses to `Unknown` and is acknowledged without a state
/// change, so new provider event types never bounce deliveries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEventType {
    /// A checkout finished; the workspace moves to the paid plan.
    CheckoutCompleted,
    /// The subscription ended; the workspace reverts to the free plan.
    SubscriptionDeleted,
    /// A renewal charge failed; the workspace reverts to the free plan.
    PaymentFailed,
    /// Unmapped event type, preserved verbatim for logging.
    Unknown(String),
}

impl BillingEventType {
    /// Parses a provider event type string.
    pub fn parse(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutCompleted,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            "invoice.payment_failed" => Self::PaymentFailed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns true if this event type has a plan effect.
    pub fn is_mapped(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

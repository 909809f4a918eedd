// In crates/journal/src/event.rs

//! Typed journal payloads.
//!
//! Each lifecycle step has its own payload struct with its own encoder, and
//! [`JournalEvent`] selects between them. The `event_type` strings are part of
//! the on-disk format.

use chrono::{DateTime, Utc};
use core_types::{DecisionReason, ExecutionDecision, ExposureState, Side, Symbol, TradeIntent};
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};

pub const DECISION: &str = "decision";
pub const DRAFT_ORDER: &str = "draft_order";
pub const CONFIRMATION: &str = "confirmation";
pub const REJECTION: &str = "rejection";

/// The guard's verdict together with the inputs that produced it.
#[derive(Debug, Clone)]
pub struct DecisionRecorded {
    pub decision: ExecutionDecision,
    pub intent: Option<TradeIntent>,
    pub exposure: Option<ExposureState>,
}

impl DecisionRecorded {
    pub fn to_data(&self) -> Map<String, Value> {
        object(json!({
            "allowed": self.decision.allowed,
            "reason": self.decision.reason,
            "suggested_size": self.decision.suggested_size,
            "intent": self.intent,
            "exposure": self.exposure,
        }))
    }
}

/// A sized, approved order awaiting confirmation.
#[derive(Debug, Clone)]
pub struct DraftRecorded {
    pub client_order_id: String,
    pub size: Decimal,
    pub intent: TradeIntent,
    pub decision_reason: DecisionReason,
}

impl DraftRecorded {
    pub fn to_data(&self) -> Map<String, Value> {
        object(json!({
            "client_order_id": self.client_order_id,
            "size": self.size,
            "intent": self.intent,
            "decision_reason": self.decision_reason,
        }))
    }
}

/// A draft that passed explicit confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmationRecorded {
    pub client_order_id: String,
    pub size: Decimal,
    pub symbol: Symbol,
    pub side: Side,
    pub confirmation_token: String,
    pub confirmed_at: DateTime<Utc>,
}

impl ConfirmationRecorded {
    pub fn to_data(&self) -> Map<String, Value> {
        object(json!({
            "client_order_id": self.client_order_id,
            "size": self.size,
            "symbol": self.symbol,
            "side": self.side,
            "confirmation_token": self.confirmation_token,
            "confirmed_at": self.confirmed_at,
        }))
    }
}

/// A refused lifecycle step, e.g. a bad confirmation phrase.
#[derive(Debug, Clone)]
pub struct Rejected {
    pub reason: String,
    /// Free-form context; written as `{}` when absent.
    pub details: Option<Value>,
}

impl Rejected {
    pub fn to_data(&self) -> Map<String, Value> {
        object(json!({
            "reason": self.reason,
            "details": self.details.clone().unwrap_or_else(|| json!({})),
        }))
    }
}

/// Unwraps a `json!` object literal.
fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[derive(Debug, Clone)]
pub enum JournalEvent {
    Decision(DecisionRecorded),
    DraftOrder(DraftRecorded),
    Confirmation(ConfirmationRecorded),
    Rejection(Rejected),
}

impl JournalEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            JournalEvent::Decision(_) => DECISION,
            JournalEvent::DraftOrder(_) => DRAFT_ORDER,
            JournalEvent::Confirmation(_) => CONFIRMATION,
            JournalEvent::Rejection(_) => REJECTION,
        }
    }

    pub fn to_data(&self) -> Map<String, Value> {
        match self {
            JournalEvent::Decision(payload) => payload.to_data(),
            JournalEvent::DraftOrder(payload) => payload.to_data(),
            JournalEvent::Confirmation(payload) => payload.to_data(),
            JournalEvent::Rejection(payload) => payload.to_data(),
        }
    }
}

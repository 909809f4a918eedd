// In crates/execution/src/types.rs

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use core_types::{Side, Symbol, TradeIntent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The phrase an operator must type to turn a draft into a confirmed order.
pub const CONFIRMATION_PHRASE: &str = "CONFIRM";

/// Settings for the draft/confirm flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSettings {
    /// Compared against the trimmed, upper-cased confirmation text.
    #[serde(default = "default_confirmation_phrase")]
    pub confirmation_phrase: String,
}

fn default_confirmation_phrase() -> String {
    CONFIRMATION_PHRASE.to_string()
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            confirmation_phrase: default_confirmation_phrase(),
        }
    }
}

impl ExecutionSettings {
    /// The phrase must already be in normalized form, otherwise no input could match it.
    pub fn validate(&self) -> Result<()> {
        let phrase = &self.confirmation_phrase;
        if phrase.is_empty() || *phrase != phrase.trim().to_uppercase() {
            return Err(Error::InvalidSettings(format!(
                "confirmation_phrase must be non-empty, trimmed and upper-case, got '{phrase}'"
            )));
        }
        Ok(())
    }
}

/// A sized, guard-approved trade that has not been committed.
///
/// Only [`crate::ExecutionWrapper::draft_order`] creates drafts, and confirming
/// one consumes it.
#[derive(Debug, PartialEq, Serialize)]
pub struct DraftOrder {
    client_order_id: String,
    intent: TradeIntent,
    side: Side,
    size: Decimal,
}

impl DraftOrder {
    pub(crate) fn new(client_order_id: String, intent: TradeIntent, side: Side, size: Decimal) -> Self {
        Self {
            client_order_id,
            intent,
            side,
            size,
        }
    }

    pub fn client_order_id(&self) -> &str {
        &self.client_order_id
    }

    pub fn intent(&self) -> &TradeIntent {
        &self.intent
    }

    pub fn symbol(&self) -> &Symbol {
        &self.intent.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn size(&self) -> Decimal {
        self.size
    }
}

/// Proof that the operator typed the confirmation phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationToken {
    value: String,
    confirmed_at: DateTime<Utc>,
}

impl ConfirmationToken {
    pub(crate) fn new(value: String) -> Self {
        Self {
            value,
            confirmed_at: Utc::now(),
        }
    }

    /// The normalized phrase that was accepted.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn confirmed_at(&self) -> DateTime<Utc> {
        self.confirmed_at
    }
}

/// A draft bound to its confirmation. The only artifact an exchange adapter may execute.
#[derive(Debug, PartialEq, Serialize)]
pub struct ConfirmedOrder {
    draft: DraftOrder,
    confirmation: ConfirmationToken,
}

impl ConfirmedOrder {
    pub(crate) fn new(draft: DraftOrder, confirmation: ConfirmationToken) -> Self {
        Self { draft, confirmation }
    }

    pub fn draft(&self) -> &DraftOrder {
        &self.draft
    }

    pub fn confirmation(&self) -> &ConfirmationToken {
        &self.confirmation
    }

    pub fn client_order_id(&self) -> &str {
        self.draft.client_order_id()
    }
}

/// An adapter's acknowledgement that a confirmed order was accepted for execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub client_order_id: String,
    pub venue_order_id: String,
    pub accepted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phrase_is_confirm() {
        let settings = ExecutionSettings::default();
        assert_eq!(settings.confirmation_phrase, "CONFIRM");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn unreachable_phrases_are_rejected() {
        for phrase in ["", "confirm", " GO ", "Go Ahead"] {
            let settings = ExecutionSettings {
                confirmation_phrase: phrase.to_string(),
            };
            assert!(
                matches!(settings.validate(), Err(Error::InvalidSettings(_))),
                "phrase {phrase:?} should be invalid"
            );
        }

        let custom = ExecutionSettings {
            confirmation_phrase: "SEND IT".to_string(),
        };
        assert!(custom.validate().is_ok());
    }
}

// In crates/execution/src/wrapper.rs

use crate::types::{ConfirmationToken, ConfirmedOrder, DraftOrder, ExecutionSettings};
use crate::{Error, Result};
use core_types::{ExecutionDecision, ExposureState, IdGenerator, RandomIdGenerator, Side, TradeIntent};
use journal::{ConfirmationRecorded, DraftRecorded, Journal};
use risk::{AccountState, PreTradeGuard};
use serde_json::json;
use std::sync::Arc;

/// Prefix on every client order id handed out by the wrapper.
pub const DRAFT_ID_PREFIX: &str = "draft-";

/// The two-step path from a trade idea to something an exchange may execute.
///
/// 1. [`draft_order`](Self::draft_order) runs the pre-trade guard and, if the
///    trade is allowed, returns a sized [`DraftOrder`].
/// 2. [`confirm_order`](Self::confirm_order) turns that draft into a
///    [`ConfirmedOrder`] only when given the exact confirmation phrase.
///
/// Approval and commitment are separate calls with no shortcut between them.
/// Every decision, draft, confirmation and refused confirmation is journaled.
pub struct ExecutionWrapper {
    guard: PreTradeGuard,
    journal: Arc<Journal>,
    order_ids: Arc<dyn IdGenerator>,
    settings: ExecutionSettings,
}

impl ExecutionWrapper {
    /// Creates a wrapper with the default `CONFIRM` phrase and short random order ids.
    pub fn new(guard: PreTradeGuard, journal: Arc<Journal>) -> Self {
        Self {
            guard,
            journal,
            order_ids: Arc::new(RandomIdGenerator::short()),
            settings: ExecutionSettings::default(),
        }
    }

    /// Creates a wrapper with explicit settings and order id source.
    pub fn with_settings(
        guard: PreTradeGuard,
        journal: Arc<Journal>,
        settings: ExecutionSettings,
        order_ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            guard,
            journal,
            order_ids,
            settings,
        })
    }

    pub fn journal(&self) -> &Arc<Journal> {
        &self.journal
    }

    pub fn guard(&self) -> &PreTradeGuard {
        &self.guard
    }

    pub fn confirmation_phrase(&self) -> &str {
        &self.settings.confirmation_phrase
    }

    /// Evaluates the trade and, if allowed, builds a draft.
    ///
    /// Rejections are returned as data, never as errors: the draft is `None`
    /// and the decision carries the reason. The decision is always journaled;
    /// an allowed one is followed by a `draft_order` entry.
    pub fn draft_order(
        &self,
        state: &AccountState,
        intent: &TradeIntent,
        exposure: &ExposureState,
    ) -> (ExecutionDecision, Option<DraftOrder>) {
        let decision = self.guard.evaluate(state, intent, exposure);
        self.journal.record_decision(&decision, Some(intent), Some(exposure));

        // The guard only allows a parsed side with a positive size.
        let (size, side) = match (decision.suggested_size, intent.side.parse::<Side>()) {
            (Some(size), Ok(side)) if decision.allowed => (size, side),
            _ => {
                tracing::info!(symbol = %intent.symbol, reason = %decision.reason, "Trade rejected at pre-trade check.");
                return (decision, None);
            }
        };

        let client_order_id = format!("{DRAFT_ID_PREFIX}{}", self.order_ids.next_id());
        let draft = DraftOrder::new(client_order_id, intent.clone(), side, size);

        self.journal.record_draft(DraftRecorded {
            client_order_id: draft.client_order_id().to_string(),
            size,
            intent: intent.clone(),
            decision_reason: decision.reason,
        });
        tracing::info!(
            client_order_id = draft.client_order_id(),
            symbol = %intent.symbol,
            side = %side,
            %size,
            "Draft order created; awaiting confirmation."
        );

        (decision, Some(draft))
    }

    /// Commits a draft if `confirmation_text` normalizes to the confirmation phrase.
    ///
    /// The text is trimmed and upper-cased, so `"confirm"` and `" CONFIRM "` both
    /// pass while `"yes"` or `"CONFIRMED"` do not. The draft is consumed either
    /// way: a refused draft cannot be confirmed later.
    ///
    /// # Errors
    ///
    /// * [`Error::DraftRequired`] when `draft` is `None`.
    /// * [`Error::ConfirmationRequired`] when the phrase does not match.
    ///
    /// Both are journaled as `rejection` entries before being returned.
    pub fn confirm_order(&self, draft: Option<DraftOrder>, confirmation_text: &str) -> Result<ConfirmedOrder> {
        let Some(draft) = draft else {
            let err = Error::DraftRequired;
            self.journal.record_rejection(err.code(), None);
            tracing::warn!("Confirmation attempted without a draft order.");
            return Err(err);
        };

        let normalized = confirmation_text.trim().to_uppercase();
        if normalized != self.settings.confirmation_phrase {
            let err = Error::ConfirmationRequired;
            self.journal.record_rejection(
                err.code(),
                Some(json!({
                    "client_order_id": draft.client_order_id(),
                    "symbol": draft.symbol(),
                    "received": confirmation_text,
                })),
            );
            tracing::warn!(client_order_id = draft.client_order_id(), "Confirmation phrase did not match; draft discarded.");
            return Err(err);
        }

        let confirmed = ConfirmedOrder::new(draft, ConfirmationToken::new(normalized));
        let order = confirmed.draft();
        self.journal.record_confirmation(ConfirmationRecorded {
            client_order_id: order.client_order_id().to_string(),
            size: order.size(),
            symbol: order.symbol().clone(),
            side: order.side(),
            confirmation_token: confirmed.confirmation().value().to_string(),
            confirmed_at: confirmed.confirmation().confirmed_at(),
        });
        tracing::info!(client_order_id = order.client_order_id(), "Order confirmed.");

        Ok(confirmed)
    }
}

// In crates/execution/src/paper.rs

use crate::types::{ConfirmedOrder, SubmissionReceipt};
use crate::{Error, OrderSubmitter, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;

/// A submitter that accepts confirmed orders without contacting any venue.
///
/// Used for dry runs of the full draft/confirm/submit flow. Like a real venue,
/// it refuses a client order id it has already seen.
#[derive(Debug, Default)]
pub struct PaperSubmitter {
    seen: HashSet<String>,
    accepted: u64,
}

impl PaperSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders accepted so far.
    pub fn accepted_count(&self) -> u64 {
        self.accepted
    }
}

#[async_trait]
impl OrderSubmitter for PaperSubmitter {
    fn name(&self) -> &'static str {
        "PaperSubmitter"
    }

    async fn submit(&mut self, order: &ConfirmedOrder) -> Result<SubmissionReceipt> {
        let draft = order.draft();

        if !self.seen.insert(draft.client_order_id().to_string()) {
            tracing::error!(client_order_id = draft.client_order_id(), "Duplicate client order id refused.");
            return Err(Error::SubmissionFailed {
                reason: format!("duplicate client order id {}", draft.client_order_id()),
            });
        }

        self.accepted += 1;
        let receipt = SubmissionReceipt {
            client_order_id: draft.client_order_id().to_string(),
            venue_order_id: format!("paper-{}", self.accepted),
            accepted_at: Utc::now(),
        };

        tracing::info!(
            client_order_id = draft.client_order_id(),
            symbol = %draft.symbol(),
            side = %draft.side(),
            size = %draft.size(),
            venue_order_id = %receipt.venue_order_id,
            "Paper order accepted."
        );

        Ok(receipt)
    }
}

// In crates/execution/src/lib.rs

use async_trait::async_trait;
pub mod error;
pub mod paper;
pub mod types;
pub mod wrapper;

// Re-export public types
pub use error::{Error, Result};
pub use paper::PaperSubmitter;
pub use types::{
    CONFIRMATION_PHRASE, ConfirmationToken, ConfirmedOrder, DraftOrder, ExecutionSettings,
    SubmissionReceipt,
};
pub use wrapper::ExecutionWrapper;

/// The seam between this crate and an exchange adapter.
///
/// An `OrderSubmitter` takes a [`ConfirmedOrder`], the only artifact that may be
/// executed, and hands it to a venue. Signing, retries and fill tracking live
/// entirely on the adapter side; nothing in this crate calls a submitter on its
/// own.
#[async_trait]
pub trait OrderSubmitter {
    /// The name of the submitter (e.g. "PaperSubmitter").
    fn name(&self) -> &'static str;

    /// Submits a confirmed order.
    ///
    /// # Returns
    ///
    /// A `SubmissionReceipt` once the venue has accepted the order, or
    /// `Error::SubmissionFailed` if it was refused.
    async fn submit(&mut self, order: &ConfirmedOrder) -> Result<SubmissionReceipt>;
}

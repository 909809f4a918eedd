// In crates/execution/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("A draft order is required before confirmation")]
    DraftRequired,

    #[error("Explicit confirmation required: the confirmation phrase did not match")]
    ConfirmationRequired,

    #[error("Invalid execution settings: {0}")]
    InvalidSettings(String),

    #[error("Order submission failed: {reason}")]
    SubmissionFailed { reason: String },
}

impl Error {
    /// The stable code written to the journal when this error is recorded.
    pub fn code(&self) -> &'static str {
        match self {
            Error::DraftRequired => "draft_required",
            Error::ConfirmationRequired => "confirmation_required",
            Error::InvalidSettings(_) => "invalid_settings",
            Error::SubmissionFailed { .. } => "submission_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

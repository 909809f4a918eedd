// In crates/journal/src/lib.rs

pub mod error;
pub mod event;
pub mod journal;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use event::{ConfirmationRecorded, DecisionRecorded, DraftRecorded, JournalEvent, Rejected};
pub use journal::{Journal, read_entries};
pub use types::JournalEntry;

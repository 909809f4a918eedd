// In crates/journal/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One line of the audit journal.
///
/// Entries are immutable once appended; the journal hands out copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// UTC time the entry was recorded, written as ISO-8601.
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    /// Event payload. Always a JSON object, so a line with any other `data` fails to parse.
    pub data: Map<String, Value>,
    pub metadata: Option<Value>,
}

// In crates/core-types/src/ids.rs

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of unique identifiers for client order ids and journal entry ids.
///
/// Injected rather than called implicitly so tests can substitute a
/// deterministic sequence.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random ids taken from the hex form of a v4 UUID.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    len: usize,
}

impl RandomIdGenerator {
    /// Full 32-character hex ids.
    pub fn new() -> Self {
        Self { len: 32 }
    }

    /// 12-character hex ids, for tokens that end up in exchange-facing fields.
    pub fn short() -> Self {
        Self { len: 12 }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(self.len);
        id
    }
}

/// Monotonic, zero-padded ids: "000000000001", "000000000002", ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{:012}", n)
    }
}

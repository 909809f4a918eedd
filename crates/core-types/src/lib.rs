// In crates/core-types/src/lib.rs

pub mod decision;
pub mod error;
pub mod ids;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use decision::{DecisionReason, ExecutionDecision};
pub use error::{Error, Result};
pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use types::{ExposureState, Side, Symbol, TradeIntent};

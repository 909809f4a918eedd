// In crates/risk/src/lib.rs

//! Pre-trade risk policy.
//!
//! Three layers, leaves first:
//! - [`sizing::calculate_position_size`]: pure fixed-fractional sizing.
//! - [`RiskEngine`]: account gates (kill switch, daily loss cap) in front of the sizer.
//! - [`PreTradeGuard`]: execution checks (side, leverage, exposure) in front of the engine.
//!
//! Rejections are values, not errors. The only error this crate returns is an
//! invalid [`RiskConfig`].

pub mod engine;
pub mod error;
pub mod guard;
pub mod sizing;
pub mod types;

// Re-export public types
pub use engine::RiskEngine;
pub use error::{Error, Result};
pub use guard::PreTradeGuard;
pub use sizing::calculate_position_size;
pub use types::{AccountState, RiskConfig, RiskDecision};

// In crates/core-types/src/decision.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The named outcome of a risk or pre-trade evaluation.
///
/// The snake_case string form is a stable code: it is written to the journal
/// and downstream KPI tooling groups rejections by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    Ok,
    InvalidSide,
    InvalidLeverage,
    LeverageCapExceeded,
    DuplicateSymbolPosition,
    MaxOpenRiskReached,
    KillSwitchActive,
    DailyLossCapReached,
    InvalidPositionSize,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::Ok => "ok",
            DecisionReason::InvalidSide => "invalid_side",
            DecisionReason::InvalidLeverage => "invalid_leverage",
            DecisionReason::LeverageCapExceeded => "leverage_cap_exceeded",
            DecisionReason::DuplicateSymbolPosition => "duplicate_symbol_position",
            DecisionReason::MaxOpenRiskReached => "max_open_risk_reached",
            DecisionReason::KillSwitchActive => "kill_switch_active",
            DecisionReason::DailyLossCapReached => "daily_loss_cap_reached",
            DecisionReason::InvalidPositionSize => "invalid_position_size",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pre-trade guard's verdict on a `TradeIntent`.
///
/// A decision is a terminal value. `suggested_size` is `Some` exactly when the
/// trade is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDecision {
    pub allowed: bool,
    pub reason: DecisionReason,
    pub suggested_size: Option<Decimal>,
}

impl ExecutionDecision {
    pub fn allow(size: Decimal) -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::Ok,
            suggested_size: Some(size),
        }
    }

    pub fn reject(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
            suggested_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn reason_codes_match_serde_names() {
        let all = [
            DecisionReason::Ok,
            DecisionReason::InvalidSide,
            DecisionReason::InvalidLeverage,
            DecisionReason::LeverageCapExceeded,
            DecisionReason::DuplicateSymbolPosition,
            DecisionReason::MaxOpenRiskReached,
            DecisionReason::KillSwitchActive,
            DecisionReason::DailyLossCapReached,
            DecisionReason::InvalidPositionSize,
        ];
        for reason in all {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }

    #[test]
    fn only_allowed_decisions_carry_a_size() {
        let ok = ExecutionDecision::allow(dec!(2.5));
        assert!(ok.allowed);
        assert_eq!(ok.reason, DecisionReason::Ok);
        assert_eq!(ok.suggested_size, Some(dec!(2.5)));

        let rejected = ExecutionDecision::reject(DecisionReason::KillSwitchActive);
        assert!(!rejected.allowed);
        assert_eq!(rejected.suggested_size, None);
        assert_eq!(rejected.reason.to_string(), "kill_switch_active");
    }
}

// In crates/risk/src/guard.rs

use crate::engine::RiskEngine;
use crate::types::AccountState;
use core_types::{DecisionReason, ExecutionDecision, ExposureState, Side, TradeIntent};
use rust_decimal::Decimal;

/// Execution-side safety checks layered on top of the [`RiskEngine`].
///
/// Checks run in a fixed order and the first failure is the only reason reported:
/// 1. side is `long` or `short`
/// 2. leverage is positive
/// 3. leverage is within `max_leverage`
/// 4. no open position on the same symbol
/// 5. aggregate open risk is below `max_open_risk_percent`
/// 6. the risk engine's own gates and sizing
#[derive(Debug, Clone)]
pub struct PreTradeGuard {
    risk_engine: RiskEngine,
}

impl PreTradeGuard {
    pub fn new(risk_engine: RiskEngine) -> Self {
        Self { risk_engine }
    }

    pub fn risk_engine(&self) -> &RiskEngine {
        &self.risk_engine
    }

    pub fn evaluate(
        &self,
        state: &AccountState,
        intent: &TradeIntent,
        exposure: &ExposureState,
    ) -> ExecutionDecision {
        let decision = self.check(state, intent, exposure);
        if decision.allowed {
            tracing::debug!(symbol = %intent.symbol, size = ?decision.suggested_size, "Pre-trade checks passed.");
        } else {
            tracing::debug!(symbol = %intent.symbol, reason = %decision.reason, "Pre-trade checks rejected trade.");
        }
        decision
    }

    fn check(
        &self,
        state: &AccountState,
        intent: &TradeIntent,
        exposure: &ExposureState,
    ) -> ExecutionDecision {
        let config = self.risk_engine.config();

        if intent.side.parse::<Side>().is_err() {
            return ExecutionDecision::reject(DecisionReason::InvalidSide);
        }

        if intent.leverage <= Decimal::ZERO {
            return ExecutionDecision::reject(DecisionReason::InvalidLeverage);
        }

        if intent.leverage > config.max_leverage {
            return ExecutionDecision::reject(DecisionReason::LeverageCapExceeded);
        }

        if exposure.has_open_position_same_symbol {
            return ExecutionDecision::reject(DecisionReason::DuplicateSymbolPosition);
        }

        if exposure.open_risk_percent >= config.max_open_risk_percent {
            return ExecutionDecision::reject(DecisionReason::MaxOpenRiskReached);
        }

        let risk_decision = self.risk_engine.evaluate_trade(
            state,
            intent.entry_price,
            intent.stop_price,
            intent.contract_multiplier,
        );

        match risk_decision.position_size {
            Some(size) if risk_decision.allowed => ExecutionDecision::allow(size),
            _ => ExecutionDecision::reject(risk_decision.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskConfig;
    use rust_decimal_macros::dec;

    fn guard() -> PreTradeGuard {
        let config = RiskConfig {
            risk_percent: dec!(0.0025),
            daily_loss_cap_percent: dec!(0.01),
            max_consecutive_losses: 3,
            max_open_risk_percent: dec!(0.0075),
            max_leverage: dec!(3.0),
        };
        PreTradeGuard::new(RiskEngine::new(config).unwrap())
    }

    fn state() -> AccountState {
        AccountState::new(dec!(1000), Decimal::ZERO)
    }

    fn intent() -> TradeIntent {
        TradeIntent::new("BTCUSDT", "long", dec!(100.0), dec!(99.0), dec!(2.0))
    }

    fn reason_for(intent: &TradeIntent, exposure: &ExposureState) -> DecisionReason {
        guard().evaluate(&state(), intent, exposure).reason
    }

    #[test]
    fn allows_valid_trade() {
        let decision = guard().evaluate(&state(), &intent(), &ExposureState::default());
        assert!(decision.allowed);
        assert_eq!(decision.reason, DecisionReason::Ok);
        // Budget 1000 * 0.0025 = 2.5 over a stop distance of 1.
        assert_eq!(decision.suggested_size, Some(dec!(2.5)));
    }

    #[test]
    fn blocks_unknown_side() {
        let mut bad = intent();
        bad.side = "buy".to_string();
        assert_eq!(reason_for(&bad, &ExposureState::default()), DecisionReason::InvalidSide);
    }

    #[test]
    fn blocks_non_positive_leverage() {
        let mut bad = intent();
        bad.leverage = Decimal::ZERO;
        assert_eq!(reason_for(&bad, &ExposureState::default()), DecisionReason::InvalidLeverage);
        bad.leverage = dec!(-2);
        assert_eq!(reason_for(&bad, &ExposureState::default()), DecisionReason::InvalidLeverage);
    }

    #[test]
    fn blocks_leverage_cap_exceeded() {
        let mut bad = intent();
        bad.leverage = dec!(5.0);
        assert_eq!(reason_for(&bad, &ExposureState::default()), DecisionReason::LeverageCapExceeded);
    }

    #[test]
    fn leverage_at_cap_is_allowed() {
        let mut at_cap = intent();
        at_cap.leverage = dec!(3);
        assert_eq!(reason_for(&at_cap, &ExposureState::default()), DecisionReason::Ok);
    }

    #[test]
    fn leverage_rejection_never_reaches_the_engine() {
        // The account is kill-switched, so any engine call would answer
        // kill_switch_active. The guard must answer first.
        let mut locked = state();
        locked.manual_kill_switch = true;
        let mut bad = intent();
        bad.leverage = dec!(5.0);

        let decision = guard().evaluate(&locked, &bad, &ExposureState::default());
        assert_eq!(decision.reason, DecisionReason::LeverageCapExceeded);
        assert_eq!(decision.suggested_size, None);
    }

    #[test]
    fn blocks_duplicate_symbol_position() {
        let exposure = ExposureState {
            has_open_position_same_symbol: true,
            ..Default::default()
        };
        assert_eq!(reason_for(&intent(), &exposure), DecisionReason::DuplicateSymbolPosition);
    }

    #[test]
    fn blocks_max_open_risk_reached() {
        let exposure = ExposureState {
            open_risk_percent: dec!(0.01),
            ..Default::default()
        };
        assert_eq!(reason_for(&intent(), &exposure), DecisionReason::MaxOpenRiskReached);

        let at_limit = ExposureState {
            open_risk_percent: dec!(0.0075),
            ..Default::default()
        };
        assert_eq!(reason_for(&intent(), &at_limit), DecisionReason::MaxOpenRiskReached);
    }

    #[test]
    fn side_is_checked_before_everything_else() {
        let mut bad = intent();
        bad.side = "sideways".to_string();
        bad.leverage = dec!(50);
        let exposure = ExposureState {
            open_risk_percent: dec!(1),
            has_open_position_same_symbol: true,
        };
        assert_eq!(reason_for(&bad, &exposure), DecisionReason::InvalidSide);
    }

    #[test]
    fn passes_through_engine_reasons() {
        let mut losing = state();
        losing.realized_pnl_today = dec!(-20);
        let decision = guard().evaluate(&losing, &intent(), &ExposureState::default());
        assert_eq!(decision.reason, DecisionReason::DailyLossCapReached);

        let mut flat_stop = intent();
        flat_stop.stop_price = flat_stop.entry_price;
        assert_eq!(
            reason_for(&flat_stop, &ExposureState::default()),
            DecisionReason::InvalidPositionSize
        );
    }
}

// In crates/risk/src/engine.rs

use crate::sizing::calculate_position_size;
use crate::types::{AccountState, RiskConfig, RiskDecision};
use crate::Result;
use core_types::DecisionReason;
use rust_decimal::Decimal;

/// Account-level risk policy: kill switch, daily loss cap, then position sizing.
///
/// The engine holds nothing but its immutable config, so a single instance can
/// be shared across concurrent evaluations.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Creates a new `RiskEngine`, refusing a config that breaks its invariants.
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// True once today's realized loss has eaten the configured share of
    /// start-of-day equity. Profits never count towards the cap.
    ///
    /// A cap too large to represent is never reached.
    pub fn daily_loss_cap_reached(&self, state: &AccountState) -> bool {
        let Some(max_daily_loss) = state
            .start_of_day_equity
            .checked_mul(self.config.daily_loss_cap_percent)
        else {
            return false;
        };
        let realized_loss = state.realized_pnl_today.min(Decimal::ZERO).abs();
        realized_loss >= max_daily_loss
    }

    /// True if the operator pulled the switch or the losing streak hit the limit.
    pub fn kill_switch_active(&self, state: &AccountState) -> bool {
        state.manual_kill_switch || state.consecutive_losses >= self.config.max_consecutive_losses
    }

    /// Evaluates a trade against the account gates and sizes it.
    ///
    /// Gates run in a fixed order and the first failure decides the reason:
    /// 1. kill switch
    /// 2. daily loss cap
    /// 3. sizing (a zero size blocks with `invalid_position_size`)
    ///
    /// A blocked account never reaches the sizer.
    pub fn evaluate_trade(
        &self,
        state: &AccountState,
        entry_price: Decimal,
        stop_price: Decimal,
        contract_multiplier: Decimal,
    ) -> RiskDecision {
        if self.kill_switch_active(state) {
            tracing::debug!(
                consecutive_losses = state.consecutive_losses,
                manual = state.manual_kill_switch,
                "Kill switch active; trade blocked."
            );
            return RiskDecision::block(DecisionReason::KillSwitchActive);
        }

        if self.daily_loss_cap_reached(state) {
            tracing::debug!(
                realized_pnl_today = %state.realized_pnl_today,
                "Daily loss cap reached; trade blocked."
            );
            return RiskDecision::block(DecisionReason::DailyLossCapReached);
        }

        let size = calculate_position_size(
            state.start_of_day_equity,
            self.config.risk_percent,
            entry_price,
            stop_price,
            contract_multiplier,
        );

        if size <= Decimal::ZERO {
            return RiskDecision::block(DecisionReason::InvalidPositionSize);
        }

        RiskDecision::allow(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn engine() -> RiskEngine {
        let mut config = RiskConfig::new(dec!(0.01), dec!(0.03));
        config.max_consecutive_losses = 3;
        RiskEngine::new(config).unwrap()
    }

    fn account() -> AccountState {
        AccountState::new(dec!(10000), Decimal::ZERO)
    }

    #[test]
    fn allows_and_sizes_a_healthy_trade() {
        let decision = engine().evaluate_trade(&account(), dec!(100), dec!(95), Decimal::ONE);
        assert!(decision.allowed);
        assert_eq!(decision.reason, DecisionReason::Ok);
        assert_eq!(decision.position_size, Some(dec!(20)));
    }

    #[test]
    fn consecutive_losses_at_limit_trip_kill_switch() {
        let mut state = account();
        state.consecutive_losses = 3;
        let engine = engine();
        assert!(engine.kill_switch_active(&state));

        let decision = engine.evaluate_trade(&state, dec!(100), dec!(95), Decimal::ONE);
        assert!(!decision.allowed);
        assert_eq!(decision.reason, DecisionReason::KillSwitchActive);
        assert_eq!(decision.position_size, None);
    }

    #[test]
    fn manual_kill_switch_blocks() {
        let mut state = account();
        state.manual_kill_switch = true;
        let decision = engine().evaluate_trade(&state, dec!(100), dec!(95), Decimal::ONE);
        assert_eq!(decision.reason, DecisionReason::KillSwitchActive);
    }

    #[test]
    fn losses_beyond_cap_block_trading() {
        // Cap is 10000 * 0.03 = 300.
        let state = AccountState::new(dec!(10000), dec!(-350));
        let engine = engine();
        assert!(engine.daily_loss_cap_reached(&state));

        let decision = engine.evaluate_trade(&state, dec!(100), dec!(95), Decimal::ONE);
        assert_eq!(decision.reason, DecisionReason::DailyLossCapReached);
    }

    #[test]
    fn loss_exactly_at_cap_blocks() {
        let state = AccountState::new(dec!(10000), dec!(-300));
        assert!(engine().daily_loss_cap_reached(&state));
    }

    #[test]
    fn profits_never_hit_the_cap() {
        let state = AccountState::new(dec!(10000), dec!(5000));
        assert!(!engine().daily_loss_cap_reached(&state));
    }

    #[test]
    fn kill_switch_wins_over_loss_cap() {
        let mut state = AccountState::new(dec!(10000), dec!(-1000));
        state.manual_kill_switch = true;
        let decision = engine().evaluate_trade(&state, dec!(100), dec!(95), Decimal::ONE);
        assert_eq!(decision.reason, DecisionReason::KillSwitchActive);
    }

    #[test]
    fn zero_stop_distance_is_invalid_size() {
        let decision = engine().evaluate_trade(&account(), dec!(100), dec!(100), Decimal::ONE);
        assert!(!decision.allowed);
        assert_eq!(decision.reason, DecisionReason::InvalidPositionSize);
    }

    #[test]
    fn depleted_equity_never_reaches_sizing() {
        // Zero equity: the cap is zero, so any non-positive pnl has reached it.
        let state = AccountState::new(Decimal::ZERO, Decimal::ZERO);
        let decision = engine().evaluate_trade(&state, dec!(100), dec!(95), Decimal::ONE);
        assert_eq!(decision.reason, DecisionReason::DailyLossCapReached);
    }

    #[test]
    fn unrepresentable_cap_is_never_reached() {
        let engine = RiskEngine::new(RiskConfig::new(dec!(0.01), dec!(2))).unwrap();
        let state = AccountState::new(Decimal::MAX, Decimal::ZERO);
        assert!(!engine.daily_loss_cap_reached(&state));

        let decision = engine.evaluate_trade(&state, Decimal::MAX, dec!(-1), Decimal::ONE);
        assert_eq!(decision.reason, DecisionReason::InvalidPositionSize);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = RiskConfig::new(dec!(0.01), dec!(0.03));
        config.max_leverage = dec!(-1);
        assert!(RiskEngine::new(config).is_err());
    }
}

// In crates/risk/src/types.rs

use crate::{Error, Result};
use core_types::DecisionReason;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Static risk controls. Built once at startup and never mutated.
///
/// All percentages are fractions: `0.01` means one percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Share of start-of-day equity put at risk on a single trade.
    pub risk_percent: Decimal,

    /// Realized loss, as a share of start-of-day equity, that halts trading for the day.
    pub daily_loss_cap_percent: Decimal,

    /// Losing trades in a row that trip the automatic kill switch.
    #[serde(default = "default_max_consecutive_losses")]
    pub max_consecutive_losses: u32,

    /// Ceiling on aggregate risk across all open positions.
    #[serde(default = "default_max_open_risk_percent")]
    pub max_open_risk_percent: Decimal,

    #[serde(default = "default_max_leverage")]
    pub max_leverage: Decimal,
}

fn default_max_consecutive_losses() -> u32 {
    3
}

fn default_max_open_risk_percent() -> Decimal {
    dec!(0.0075)
}

fn default_max_leverage() -> Decimal {
    dec!(3.0)
}

impl RiskConfig {
    /// Creates a config with the default consecutive-loss, open-risk and leverage limits.
    pub fn new(risk_percent: Decimal, daily_loss_cap_percent: Decimal) -> Self {
        Self {
            risk_percent,
            daily_loss_cap_percent,
            max_consecutive_losses: default_max_consecutive_losses(),
            max_open_risk_percent: default_max_open_risk_percent(),
            max_leverage: default_max_leverage(),
        }
    }

    /// Checks that every percentage is non-negative and that leverage is positive.
    pub fn validate(&self) -> Result<()> {
        let percentages = [
            ("risk_percent", self.risk_percent),
            ("daily_loss_cap_percent", self.daily_loss_cap_percent),
            ("max_open_risk_percent", self.max_open_risk_percent),
        ];
        for (name, value) in percentages {
            if value < Decimal::ZERO {
                return Err(Error::InvalidParameters(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.max_leverage <= Decimal::ZERO {
            return Err(Error::InvalidParameters(format!(
                "max_leverage must be greater than zero, got {}",
                self.max_leverage
            )));
        }

        Ok(())
    }
}

/// A point-in-time snapshot of the account, taken fresh for every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    pub start_of_day_equity: Decimal,
    /// Realized PnL since the start of the trading day; losses are negative.
    pub realized_pnl_today: Decimal,
    #[serde(default)]
    pub consecutive_losses: u32,
    #[serde(default)]
    pub manual_kill_switch: bool,
}

impl AccountState {
    pub fn new(start_of_day_equity: Decimal, realized_pnl_today: Decimal) -> Self {
        Self {
            start_of_day_equity,
            realized_pnl_today,
            consecutive_losses: 0,
            manual_kill_switch: false,
        }
    }
}

/// The risk engine's verdict. `position_size` is `Some` only when allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDecision {
    pub allowed: bool,
    pub reason: DecisionReason,
    pub position_size: Option<Decimal>,
}

impl RiskDecision {
    pub(crate) fn allow(size: Decimal) -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::Ok,
            position_size: Some(size),
        }
    }

    pub(crate) fn block(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
            position_size: None,
        }
    }
}

// In crates/core-types/src/types.rs

use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trading pair symbol, e.g. "BTCUSDT".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(s.to_string())
    }
}

/// The direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Long => "long",
            Side::Short => "short",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = Error;

    /// Only the exact lowercase words are accepted. "LONG" or "buy" are not sides.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "long" => Ok(Side::Long),
            "short" => Ok(Side::Short),
            other => Err(Error::UnknownSide(other.to_string())),
        }
    }
}

/// A proposed trade, before any sizing or approval.
///
/// The side is kept as the text the strategy produced; the pre-trade guard is
/// the one place that decides whether it names a real [`Side`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIntent {
    pub symbol: Symbol,
    pub side: String,
    pub entry_price: Decimal,
    pub stop_price: Decimal,
    pub leverage: Decimal,
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: Decimal,
}

fn default_contract_multiplier() -> Decimal {
    Decimal::ONE
}

impl TradeIntent {
    /// Creates an intent with a contract multiplier of 1.
    pub fn new(
        symbol: impl Into<String>,
        side: impl Into<String>,
        entry_price: Decimal,
        stop_price: Decimal,
        leverage: Decimal,
    ) -> Self {
        Self {
            symbol: Symbol(symbol.into()),
            side: side.into(),
            entry_price,
            stop_price,
            leverage,
            contract_multiplier: default_contract_multiplier(),
        }
    }

    pub fn with_contract_multiplier(mut self, contract_multiplier: Decimal) -> Self {
        self.contract_multiplier = contract_multiplier;
        self
    }
}

/// Risk already committed through open positions, as reported by the exchange side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureState {
    /// Aggregate risk of all open positions, as a fraction of equity.
    #[serde(default)]
    pub open_risk_percent: Decimal,
    #[serde(default)]
    pub has_open_position_same_symbol: bool,
}

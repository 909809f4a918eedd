// In crates/risk/src/sizing.rs

use rust_decimal::Decimal;

/// Decimal places kept on a computed size.
pub const SIZE_PRECISION: u32 = 8;

/// Sizes a position so that hitting the stop loses exactly `balance * risk_percent`.
///
/// `size = (balance * risk_percent) / (|entry - stop| * contract_multiplier)`
///
/// Degenerate inputs (no stop distance, a non-positive multiplier, a non-positive
/// risk budget, or arithmetic overflow) produce a size of zero, never an error.
/// A zero size means "no trade". The result carries no trailing zeros.
pub fn calculate_position_size(
    balance: Decimal,
    risk_percent: Decimal,
    entry_price: Decimal,
    stop_price: Decimal,
    contract_multiplier: Decimal,
) -> Decimal {
    let stop_distance = match entry_price.checked_sub(stop_price) {
        Some(distance) => distance.abs(),
        None => return Decimal::ZERO,
    };
    if stop_distance <= Decimal::ZERO || contract_multiplier <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let risk_budget = match balance.checked_mul(risk_percent) {
        Some(budget) if budget > Decimal::ZERO => budget,
        _ => return Decimal::ZERO,
    };

    let size = stop_distance
        .checked_mul(contract_multiplier)
        .and_then(|risk_per_unit| risk_budget.checked_div(risk_per_unit))
        .unwrap_or(Decimal::ZERO);

    size.round_dp(SIZE_PRECISION).normalize().max(Decimal::ZERO)
}

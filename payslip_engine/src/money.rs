//! Monetary rounding and overflow rules.
//!
//! Every stored amount in a payslip is rounded to centavos through
//! [`round2`], so the engine uses exactly one tie-breaking rule no matter
//! which calculator produced the value.
//!
//! Engine arithmetic never overflows: sums and products that would leave
//! the `Decimal` range saturate at `Decimal::MAX` (or `Decimal::MIN`).
//! Net pay is then floored at zero as usual.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept on stored monetary amounts.
pub const CENTAVO_PLACES: u32 = 2;

/// Rounds `value` to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENTAVO_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums `values`, saturating at the bounds of `Decimal`.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}

//! Daily and hourly rate derivation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Compensable days per year for a six-day work week.
pub const COMPENSABLE_DAYS_PER_YEAR: Decimal = dec!(313);

/// Pay months per year used to annualise the monthly base.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Length of a standard workday in hours.
pub const HOURS_PER_DAY: Decimal = dec!(8);

/// Converts a monthly base salary into a daily rate.  Non-positive
/// salaries yield a rate of zero.
///
/// Salaries too large to annualise are divided first, which keeps the
/// result in range at the cost of the last significant digit.
pub fn daily_rate(monthly_basic: Decimal) -> Decimal {
    if monthly_basic <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match monthly_basic.checked_mul(MONTHS_PER_YEAR) {
        Some(annual) => annual / COMPENSABLE_DAYS_PER_YEAR,
        None => monthly_basic / COMPENSABLE_DAYS_PER_YEAR * MONTHS_PER_YEAR,
    }
}

/// Converts a daily rate into an hourly rate.
pub fn hourly_rate(daily_rate: Decimal) -> Decimal {
    daily_rate / HOURS_PER_DAY
}

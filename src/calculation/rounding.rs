//! Rounding of laytime totals and currency amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{LaytimeDuration, RoundingUnit};

/// Number of decimal places currency amounts are rounded to.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds a laytime total to the nearest multiple of `unit`.
///
/// Halves round away from zero, so with [`RoundingUnit::Minute`] a remainder
/// of 30 seconds or more rounds up. [`RoundingUnit::None`] returns the
/// duration unchanged.
///
/// # Example
///
/// ```
/// use laytime_engine::calculation::round_laytime;
/// use laytime_engine::models::{LaytimeDuration, RoundingUnit};
/// use rust_decimal::Decimal;
///
/// let used = LaytimeDuration::from_seconds(Decimal::from(7_230)); // 2h 0m 30s
/// let rounded = round_laytime(used, RoundingUnit::Minute);
/// assert_eq!(rounded.seconds(), Decimal::from(7_260));
/// ```
pub fn round_laytime(duration: LaytimeDuration, unit: RoundingUnit) -> LaytimeDuration {
    let Some(unit) = unit.as_duration() else {
        return duration;
    };

    let units = (duration.seconds() / unit.seconds())
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    LaytimeDuration::from_seconds(units * unit.seconds())
}

/// Rounds a currency amount to [`CURRENCY_DECIMAL_PLACES`], halves away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

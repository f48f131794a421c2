//! Exact laytime durations.
//!
//! Laytime is accumulated, rounded and compared as an exact decimal number of
//! seconds so that partial exceptions (e.g. 50% weather) and rounding to a unit
//! boundary never suffer floating-point drift.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// A signed span of laytime measured in seconds.
///
/// Elapsed and counted values are never negative; only a differential
/// (`used - allowed`) may be.
///
/// # Example
///
/// ```
/// use laytime_engine::models::LaytimeDuration;
/// use rust_decimal::Decimal;
///
/// let used = LaytimeDuration::from_days(Decimal::new(55, 1)); // 5.5 days
/// assert_eq!(used.to_string(), "5 days 12:00:00");
/// assert_eq!(used.as_hours(), Decimal::from(132));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LaytimeDuration(Decimal);

impl LaytimeDuration {
    /// A duration of zero seconds.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a duration from a number of seconds.
    pub fn from_seconds(seconds: Decimal) -> Self {
        Self(seconds)
    }

    /// Creates a duration from a number of minutes.
    ///
    /// # Panics
    ///
    /// Panics if the count in seconds overflows `Decimal`. Use
    /// [`checked_from_minutes`](Self::checked_from_minutes) for untrusted input.
    pub fn from_minutes(minutes: Decimal) -> Self {
        Self(minutes * Decimal::from(SECONDS_PER_MINUTE))
    }

    /// Creates a duration from a number of hours.
    ///
    /// # Panics
    ///
    /// Panics if the count in seconds overflows `Decimal`. Use
    /// [`checked_from_hours`](Self::checked_from_hours) for untrusted input.
    pub fn from_hours(hours: Decimal) -> Self {
        Self(hours * Decimal::from(SECONDS_PER_HOUR))
    }

    /// Creates a duration from a number of days.
    ///
    /// # Panics
    ///
    /// Panics if the count in seconds overflows `Decimal`. Use
    /// [`checked_from_days`](Self::checked_from_days) for untrusted input.
    pub fn from_days(days: Decimal) -> Self {
        Self(days * Decimal::from(SECONDS_PER_DAY))
    }

    /// Creates a duration from minutes, or `None` on overflow.
    pub fn checked_from_minutes(minutes: Decimal) -> Option<Self> {
        minutes.checked_mul(Decimal::from(SECONDS_PER_MINUTE)).map(Self)
    }

    /// Creates a duration from hours, or `None` on overflow.
    pub fn checked_from_hours(hours: Decimal) -> Option<Self> {
        hours.checked_mul(Decimal::from(SECONDS_PER_HOUR)).map(Self)
    }

    /// Creates a duration from days, or `None` on overflow.
    pub fn checked_from_days(days: Decimal) -> Option<Self> {
        days.checked_mul(Decimal::from(SECONDS_PER_DAY)).map(Self)
    }

    /// Returns the exact time between two timestamps, to the nanosecond.
    ///
    /// The result is negative when `to` is earlier than `from`.
    pub fn between(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        let delta = to - from;
        // subsec_nanos carries the same sign as the whole span
        let seconds = Decimal::from(delta.num_seconds());
        let nanos = Decimal::new(i64::from(delta.subsec_nanos()), 9);
        Self((seconds + nanos).normalize())
    }

    /// Returns the duration in seconds.
    pub fn seconds(&self) -> Decimal {
        self.0
    }

    /// Returns the duration in minutes.
    pub fn as_minutes(&self) -> Decimal {
        self.0 / Decimal::from(SECONDS_PER_MINUTE)
    }

    /// Returns the duration in hours.
    pub fn as_hours(&self) -> Decimal {
        self.0 / Decimal::from(SECONDS_PER_HOUR)
    }

    /// Returns the duration in days.
    pub fn as_days(&self) -> Decimal {
        self.0 / Decimal::from(SECONDS_PER_DAY)
    }

    /// Returns `true` if the duration is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `true` if the duration is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the absolute value of the duration.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the share of this duration counted at `percent` (0-100).
    pub fn percent(&self, percent: Decimal) -> Self {
        Self(self.0 * percent / Decimal::ONE_HUNDRED)
    }
}

impl Add for LaytimeDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for LaytimeDuration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for LaytimeDuration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for LaytimeDuration {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for LaytimeDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Formats as `D days HH:MM:SS` (or `HH:MM:SS` below one day).
///
/// Fractions of a second are truncated for display only.
impl fmt::Display for LaytimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.abs().trunc().to_i64().unwrap_or(i64::MAX);
        let days = total / SECONDS_PER_DAY;
        let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = total % SECONDS_PER_MINUTE;

        if self.is_negative() && total > 0 {
            write!(f, "-")?;
        }
        match days {
            0 => {}
            1 => write!(f, "1 day ")?,
            n => write!(f, "{} days ", n)?,
        }
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_between_two_hours() {
        let d = LaytimeDuration::between(
            make_datetime("2025-11-20 10:00:00"),
            make_datetime("2025-11-20 12:00:00"),
        );
        assert_eq!(d.seconds(), dec("7200"));
        assert_eq!(d.as_hours(), dec("2"));
    }

    #[test]
    fn test_between_same_instant_is_zero() {
        let at = make_datetime("2025-11-20 12:00:00");
        assert!(LaytimeDuration::between(at, at).is_zero());
    }

    #[test]
    fn test_between_reversed_is_negative() {
        let d = LaytimeDuration::between(
            make_datetime("2025-11-20 12:00:00"),
            make_datetime("2025-11-20 10:00:00"),
        );
        assert!(d.is_negative());
        assert_eq!(d.abs().as_hours(), dec("2"));
    }

    #[test]
    fn test_between_keeps_sub_millisecond_spans() {
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap();

        let d = LaytimeDuration::between(
            at("2025-11-20 10:00:00.0004"),
            at("2025-11-20 10:00:00.0009"),
        );
        assert_eq!(d.seconds(), dec("0.0005"));

        let reversed = LaytimeDuration::between(
            at("2025-11-20 10:00:01.25"),
            at("2025-11-20 10:00:00.5"),
        );
        assert_eq!(reversed.seconds(), dec("-0.75"));
    }

    #[test]
    fn test_checked_constructors_reject_overflow() {
        let huge = dec("1000000000000000000000000");
        assert_eq!(LaytimeDuration::checked_from_days(huge), None);
        assert_eq!(LaytimeDuration::checked_from_hours(Decimal::MAX), None);
        assert_eq!(LaytimeDuration::checked_from_minutes(Decimal::MAX), None);
        assert_eq!(
            LaytimeDuration::checked_from_days(dec("4")),
            Some(LaytimeDuration::from_hours(dec("96")))
        );
    }

    #[test]
    fn test_unit_constructors_agree() {
        assert_eq!(
            LaytimeDuration::from_days(dec("1")),
            LaytimeDuration::from_hours(dec("24"))
        );
        assert_eq!(
            LaytimeDuration::from_hours(dec("1.5")),
            LaytimeDuration::from_minutes(dec("90"))
        );
        assert_eq!(
            LaytimeDuration::from_minutes(dec("2")),
            LaytimeDuration::from_seconds(dec("120"))
        );
    }

    #[test]
    fn test_percent_of_duration() {
        let d = LaytimeDuration::from_hours(dec("4"));
        assert_eq!(d.percent(dec("50")), LaytimeDuration::from_hours(dec("2")));
        assert_eq!(d.percent(Decimal::ZERO), LaytimeDuration::ZERO);
        assert_eq!(d.percent(dec("100")), d);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = LaytimeDuration::from_hours(dec("3"));
        let b = LaytimeDuration::from_hours(dec("5"));
        assert_eq!((a - b).as_hours(), dec("-2"));
        assert_eq!(-(a - b), LaytimeDuration::from_hours(dec("2")));

        let total: LaytimeDuration = vec![a, b, a].into_iter().sum();
        assert_eq!(total.as_hours(), dec("11"));

        let mut running = LaytimeDuration::ZERO;
        running += a;
        assert_eq!(running, a);
    }

    #[test]
    fn test_display_matches_calculation_page() {
        assert_eq!(
            LaytimeDuration::from_days(dec("5.5")).to_string(),
            "5 days 12:00:00"
        );
        assert_eq!(
            LaytimeDuration::from_days(dec("1.5")).to_string(),
            "1 day 12:00:00"
        );
        assert_eq!(
            LaytimeDuration::from_hours(dec("2")).to_string(),
            "02:00:00"
        );
        assert_eq!(LaytimeDuration::ZERO.to_string(), "00:00:00");
    }

    #[test]
    fn test_display_negative_and_fractional() {
        assert_eq!(
            (-LaytimeDuration::from_days(dec("4"))).to_string(),
            "-4 days 00:00:00"
        );
        assert_eq!(
            LaytimeDuration::from_seconds(dec("61.9")).to_string(),
            "00:01:01"
        );
    }

    #[test]
    fn test_serializes_as_seconds_string() {
        let d = LaytimeDuration::from_hours(dec("2"));
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"7200\"");

        let back: LaytimeDuration = serde_json::from_str("\"7200\"").unwrap();
        assert_eq!(back, d);
    }
}

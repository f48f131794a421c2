//! Calculation result models for the Laytime Calculation Engine.
//!
//! This module contains the [`CalculationResult`] type and the ledger
//! structures that record how each Statement-of-Facts event contributed
//! to the laytime used.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LaytimeDuration, SofEvent};

/// How the counting rate of a ledger entry was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RateSource {
    /// The event carried its own rate.
    Explicit,
    /// An exception rule matched; `index` is its position in the terms.
    Rule {
        /// Position of the matching rule in `TermsConfig::exception_rules`.
        index: usize,
    },
    /// Nothing matched, so the event counted in full.
    Default,
}

/// Which party the final amount is owed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Allowed laytime was exceeded; the charterer pays the owner.
    Demurrage,
    /// Laytime was saved and despatch is payable; the owner pays the charterer.
    Despatch,
    /// Nothing is owed either way.
    None,
}

/// One event's contribution to laytime.
///
/// # Example
///
/// ```
/// use laytime_engine::models::{LaytimeDuration, LedgerEntry, RateSource, SofEvent, SofEventKind};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = NaiveDateTime::parse_from_str("2025-11-20 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let entry = LedgerEntry {
///     event: SofEvent::point("sof_001", SofEventKind::NorTendered, "NOR Tendered", at),
///     elapsed: LaytimeDuration::ZERO,
///     rate: Decimal::ONE_HUNDRED,
///     rate_source: RateSource::Default,
///     counted: LaytimeDuration::ZERO,
///     running_total: LaytimeDuration::ZERO,
/// };
/// assert!(entry.excepted().is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The event this entry accounts for.
    pub event: SofEvent,
    /// Raw time between the event's `from` and `to`.
    pub elapsed: LaytimeDuration,
    /// The resolved counting rate (0-100).
    pub rate: Decimal,
    /// Where the rate came from.
    pub rate_source: RateSource,
    /// Time counted toward laytime: `elapsed * rate / 100`.
    pub counted: LaytimeDuration,
    /// Sum of `counted` for this and every earlier entry.
    pub running_total: LaytimeDuration,
}

impl LedgerEntry {
    /// Returns the part of the elapsed time that did not count.
    pub fn excepted(&self) -> LaytimeDuration {
        self.elapsed - self.counted
    }
}

/// The complete result of a laytime calculation.
///
/// Produced fresh by every call to [`calculate`](crate::calculation::calculate);
/// nothing outside the engine constructs or mutates one in normal use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Per-event contributions, in chronological order.
    pub ledger: Vec<LedgerEntry>,
    /// Sum of all elapsed time, before exceptions.
    pub total_elapsed: LaytimeDuration,
    /// Elapsed time removed by exceptions (unrounded).
    pub total_excepted: LaytimeDuration,
    /// Sum of all counted time, rounded to the terms' rounding unit.
    pub total_laytime_used: LaytimeDuration,
    /// The allowance copied from the terms.
    pub laytime_allowed: LaytimeDuration,
    /// `total_laytime_used - laytime_allowed`; positive means time lost.
    pub differential: LaytimeDuration,
    /// Which party the amount is owed to.
    pub direction: Direction,
    /// Signed amount in currency: positive for demurrage, negative for despatch.
    pub amount: Decimal,
}

impl CalculationResult {
    /// Returns the unsigned amount owed.
    pub fn amount_magnitude(&self) -> Decimal {
        self.amount.abs()
    }
}

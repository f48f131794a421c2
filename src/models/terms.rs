//! Charter-party terms model.
//!
//! This module defines [`TermsConfig`] and the exception-rule, rounding and
//! rate-basis types that govern how a claim's laytime is counted and priced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{LaytimeDuration, SofEvent, SofEventKind};

/// The smallest unit the total laytime used is rounded to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingUnit {
    /// No rounding is applied.
    #[default]
    None,
    /// Round to the nearest second.
    Second,
    /// Round to the nearest minute.
    Minute,
    /// Round to the nearest hour.
    Hour,
    /// Round to the nearest day.
    Day,
}

impl RoundingUnit {
    /// Returns the size of the unit, or `None` when rounding is disabled.
    pub fn as_duration(&self) -> Option<LaytimeDuration> {
        let seconds = match self {
            RoundingUnit::None => return None,
            RoundingUnit::Second => 1,
            RoundingUnit::Minute => 60,
            RoundingUnit::Hour => 3_600,
            RoundingUnit::Day => 86_400,
        };
        Some(LaytimeDuration::from_seconds(Decimal::from(seconds)))
    }
}

/// The time unit demurrage and despatch rates are quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Amount per day (pro rata).
    #[default]
    PerDay,
    /// Amount per hour (pro rata).
    PerHour,
}

impl RateBasis {
    /// Expresses `duration` as a (fractional) count of this basis' unit.
    pub fn units_of(&self, duration: LaytimeDuration) -> Decimal {
        match self {
            RateBasis::PerDay => duration.as_days(),
            RateBasis::PerHour => duration.as_hours(),
        }
    }
}

/// What an exception rule matches on.
///
/// Serialized as `{"match": "kind", "value": "weather_interruption"}` or
/// `{"match": "label", "value": "Sunday"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum RulePattern {
    /// Matches every event of the given kind.
    Kind(SofEventKind),
    /// Matches events whose label contains this text, ignoring case.
    Label(String),
}

impl RulePattern {
    /// Returns `true` if the pattern applies to `event`.
    pub fn matches(&self, event: &SofEvent) -> bool {
        match self {
            RulePattern::Kind(kind) => event.kind == *kind,
            RulePattern::Label(text) => {
                let needle = text.trim().to_lowercase();
                !needle.is_empty() && event.label.to_lowercase().contains(&needle)
            }
        }
    }
}

/// An override rate for events matching a pattern.
///
/// # Example
///
/// ```
/// use laytime_engine::models::{ExceptionRule, RulePattern, SofEventKind};
/// use rust_decimal::Decimal;
///
/// let weather = ExceptionRule {
///     pattern: RulePattern::Kind(SofEventKind::WeatherInterruption),
///     rate: Decimal::ZERO,
///     description: "Weather working days".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRule {
    /// The events this rule applies to.
    pub pattern: RulePattern,
    /// Percentage (0-100) of matching intervals that counts toward laytime.
    pub rate: Decimal,
    /// Human-readable explanation shown alongside the ledger.
    #[serde(default)]
    pub description: String,
}

impl ExceptionRule {
    /// Checks the rule's rate lies within `[0, 100]`.
    pub fn validate(&self, index: usize) -> EngineResult<()> {
        if !is_valid_rate(self.rate) {
            return Err(EngineError::InvalidTerms {
                field: format!("exception_rules[{}].rate", index),
                message: format!("rate {} is outside 0-100", self.rate),
            });
        }
        Ok(())
    }
}

/// The charter-party terms governing a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsConfig {
    /// Laytime the charterer may use before demurrage accrues.
    pub allowed_laytime: LaytimeDuration,
    /// Amount per [`RateBasis`] unit charged once allowed laytime is exceeded.
    #[serde(default)]
    pub demurrage_rate: Option<Decimal>,
    /// Amount per [`RateBasis`] unit credited for unused laytime.
    ///
    /// Absent or zero means despatch is not payable.
    #[serde(default)]
    pub despatch_rate: Option<Decimal>,
    /// The unit the rates are quoted in.
    #[serde(default)]
    pub rate_basis: RateBasis,
    /// Ordered rules used when an event carries no explicit rate.
    #[serde(default)]
    pub exception_rules: Vec<ExceptionRule>,
    /// Unit the total laytime used is rounded to.
    #[serde(default)]
    pub rounding_unit: RoundingUnit,
}

impl TermsConfig {
    /// Creates terms with the given allowance and no rates, rules or rounding.
    pub fn new(allowed_laytime: LaytimeDuration) -> Self {
        Self {
            allowed_laytime,
            demurrage_rate: None,
            despatch_rate: None,
            rate_basis: RateBasis::PerDay,
            exception_rules: Vec::new(),
            rounding_unit: RoundingUnit::None,
        }
    }

    /// Returns `true` if unused laytime earns despatch.
    pub fn despatch_payable(&self) -> bool {
        self.despatch_rate.is_some_and(|rate| rate > Decimal::ZERO)
    }

    /// Checks that the allowance and rates hold usable values.
    ///
    /// Exception-rule rates are checked when a rule is applied to an event,
    /// so that the failure names the event it would have affected.
    pub fn validate(&self) -> EngineResult<()> {
        if self.allowed_laytime.is_negative() {
            return Err(invalid_terms("allowed_laytime", "must not be negative"));
        }
        if self.demurrage_rate.is_some_and(|r| r < Decimal::ZERO) {
            return Err(invalid_terms("demurrage_rate", "must not be negative"));
        }
        if self.despatch_rate.is_some_and(|r| r < Decimal::ZERO) {
            return Err(invalid_terms("despatch_rate", "must not be negative"));
        }
        Ok(())
    }
}

/// Returns `true` if `rate` is a percentage within `[0, 100]`.
pub(crate) fn is_valid_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE_HUNDRED
}

fn invalid_terms(field: &str, message: &str) -> EngineError {
    EngineError::InvalidTerms {
        field: field.to_string(),
        message: message.to_string(),
    }
}

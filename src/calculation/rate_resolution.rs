//! Exception-rule evaluation.
//!
//! This module decides what share of an event's interval counts toward
//! laytime, from the event's own rate or the terms' exception rules.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{ExceptionRule, RateSource, RulePattern, SofEvent, is_valid_rate};

/// The rate applied to events that carry no rate and match no rule.
pub const DEFAULT_RATE: Decimal = Decimal::ONE_HUNDRED;

/// A counting rate together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    /// Percentage (0-100) of the interval that counts.
    pub rate: Decimal,
    /// How the rate was determined.
    pub source: RateSource,
}

/// Resolves the counting rate for an event.
///
/// An explicit event rate always wins. Otherwise kind rules are consulted in
/// configured order, then label rules in configured order, and the first
/// match supplies the rate. Events matching nothing count at [`DEFAULT_RATE`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidEvent`] naming the event if the resolved
/// rate lies outside `[0, 100]`.
///
/// # Example
///
/// ```
/// use laytime_engine::calculation::resolve_rate;
/// use laytime_engine::models::{ExceptionRule, RateSource, RulePattern, SofEvent, SofEventKind};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = NaiveDateTime::parse_from_str("2025-11-23 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let sunday = SofEvent::point("sof_009", SofEventKind::OtherNamedDeduction, "Sunday SHEX", at);
/// let rules = vec![ExceptionRule {
///     pattern: RulePattern::Label("sunday".to_string()),
///     rate: Decimal::ZERO,
///     description: "Sundays excepted".to_string(),
/// }];
///
/// let resolved = resolve_rate(&sunday, &rules).unwrap();
/// assert_eq!(resolved.rate, Decimal::ZERO);
/// assert_eq!(resolved.source, RateSource::Rule { index: 0 });
/// ```
pub fn resolve_rate(event: &SofEvent, rules: &[ExceptionRule]) -> EngineResult<ResolvedRate> {
    let resolved = match event.rate {
        Some(rate) => ResolvedRate {
            rate,
            source: RateSource::Explicit,
        },
        None => find_rule(event, rules)
            .map(|(index, rule)| ResolvedRate {
                rate: rule.rate,
                source: RateSource::Rule { index },
            })
            .unwrap_or(ResolvedRate {
                rate: DEFAULT_RATE,
                source: RateSource::Default,
            }),
    };

    if !is_valid_rate(resolved.rate) {
        let origin = match resolved.source {
            RateSource::Rule { index } => format!("exception rule {}", index),
            _ => "event".to_string(),
        };
        return Err(EngineError::InvalidEvent {
            event_id: event.id.clone(),
            message: format!("rate {} from {} is outside 0-100", resolved.rate, origin),
        });
    }

    Ok(resolved)
}

fn find_rule<'a>(
    event: &SofEvent,
    rules: &'a [ExceptionRule],
) -> Option<(usize, &'a ExceptionRule)> {
    let is_kind = |rule: &ExceptionRule| matches!(rule.pattern, RulePattern::Kind(_));

    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| is_kind(rule) && rule.pattern.matches(event))
        .or_else(|| {
            rules
                .iter()
                .enumerate()
                .find(|(_, rule)| !is_kind(rule) && rule.pattern.matches(event))
        })
}

//! The laytime calculation itself.
//!
//! Walks Statement-of-Facts events in time order, counts each interval at its
//! resolved rate, and settles the rounded total against the terms.

use crate::error::EngineResult;
use crate::models::{CalculationResult, LaytimeDuration, LedgerEntry, SofEvent, TermsConfig};

use super::rate_resolution::resolve_rate;
use super::rounding::round_laytime;
use super::settlement::settle;

/// Calculates laytime used and the resulting demurrage or despatch.
///
/// Events are processed in ascending `from` order. Events with equal `from`
/// keep their input order. Overlapping intervals are summed as given, and
/// zero-length events still appear in the ledger.
///
/// The function is pure: it reads only its arguments, holds no state between
/// calls, and may be called concurrently from any number of threads.
///
/// # Errors
///
/// - [`EngineError::InvalidEvent`](crate::error::EngineError::InvalidEvent) if an
///   event ends before it starts or resolves to a rate outside `[0, 100]`.
/// - [`EngineError::InvalidTerms`](crate::error::EngineError::InvalidTerms) if the
///   allowance or a rate is negative.
/// - [`EngineError::MissingTerms`](crate::error::EngineError::MissingTerms) if
///   demurrage is due and no demurrage rate is set.
///
/// No partial result is returned on failure.
///
/// # Example
///
/// ```
/// use laytime_engine::calculation::calculate;
/// use laytime_engine::models::{Direction, LaytimeDuration, SofEvent, SofEventKind, TermsConfig};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let events = vec![
///     SofEvent::point("sof_001", SofEventKind::NorTendered, "NOR Tendered", at("2025-11-20 08:00:00")),
///     SofEvent::new("sof_002", SofEventKind::LoadingStart, "Loading", at("2025-11-20 08:00:00"), at("2025-11-24 08:00:00")),
/// ];
/// let terms = TermsConfig::new(LaytimeDuration::from_days(Decimal::from(4)));
///
/// let result = calculate(&events, &terms).unwrap();
/// assert_eq!(result.ledger.len(), 2);
/// assert_eq!(result.direction, Direction::None);
/// assert_eq!(result.total_laytime_used.to_string(), "4 days 00:00:00");
/// ```
pub fn calculate(events: &[SofEvent], terms: &TermsConfig) -> EngineResult<CalculationResult> {
    terms.validate()?;

    let mut ordered: Vec<&SofEvent> = events.iter().collect();
    // Stable: simultaneous entries stay in recorded order.
    ordered.sort_by_key(|event| event.from);

    let mut ledger = Vec::with_capacity(ordered.len());
    let mut total_elapsed = LaytimeDuration::ZERO;
    let mut running_total = LaytimeDuration::ZERO;

    for event in ordered {
        event.validate_interval()?;

        let elapsed = event.elapsed();
        let resolved = resolve_rate(event, &terms.exception_rules)?;
        let counted = elapsed.percent(resolved.rate);

        total_elapsed += elapsed;
        running_total += counted;

        ledger.push(LedgerEntry {
            event: event.clone(),
            elapsed,
            rate: resolved.rate,
            rate_source: resolved.source,
            counted,
            running_total,
        });
    }

    let total_laytime_used = round_laytime(running_total, terms.rounding_unit);
    let settlement = settle(total_laytime_used, terms)?;

    Ok(CalculationResult {
        ledger,
        total_elapsed,
        total_excepted: total_elapsed - running_total,
        total_laytime_used,
        laytime_allowed: terms.allowed_laytime,
        differential: settlement.differential,
        direction: settlement.direction,
        amount: settlement.amount,
    })
}

//! Core data models for the Laytime Calculation Engine.
//!
//! This module contains the domain models consumed and produced by the engine:
//! Statement-of-Facts events, charter-party terms, and calculation results.

mod calculation_result;
mod laytime_duration;
mod sof_event;
mod terms;

pub use calculation_result::{CalculationResult, Direction, LedgerEntry, RateSource};
pub use laytime_duration::LaytimeDuration;
pub use sof_event::{SofEvent, SofEventKind};
pub use terms::{ExceptionRule, RateBasis, RoundingUnit, RulePattern, TermsConfig};

pub(crate) use terms::is_valid_rate;

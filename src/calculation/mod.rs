//! Calculation logic for the Laytime Calculation Engine.
//!
//! This module contains the laytime calculation over Statement-of-Facts
//! events, exception-rule rate resolution, rounding of laytime totals and
//! currency amounts, and demurrage/despatch settlement.

mod engine;
mod rate_resolution;
mod rounding;
mod settlement;

pub use engine::calculate;
pub use rate_resolution::{DEFAULT_RATE, ResolvedRate, resolve_rate};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency, round_laytime};
pub use settlement::{Settlement, settle};

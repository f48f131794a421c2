//! Demurrage and despatch settlement.
//!
//! Turns a rounded laytime total into the differential against the allowance
//! and the resulting demurrage or despatch amount.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Direction, LaytimeDuration, TermsConfig};

use super::rounding::round_currency;

/// The outcome of comparing laytime used against laytime allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// `used - allowed`; positive means time lost.
    pub differential: LaytimeDuration,
    /// Which party the amount is owed to.
    pub direction: Direction,
    /// Signed amount: positive for demurrage, negative for despatch.
    pub amount: Decimal,
}

/// Settles laytime used against the terms.
///
/// Time lost is charged at the demurrage rate. Time saved earns despatch at
/// the despatch rate when despatch is payable, and nothing otherwise. Rates
/// apply pro rata in the terms' [`RateBasis`](crate::models::RateBasis) unit;
/// the amount is rounded to currency precision.
///
/// # Errors
///
/// - [`EngineError::MissingTerms`] for `demurrage_rate` when time was lost
///   and the terms carry no demurrage rate.
/// - [`EngineError::InvalidTerms`] naming the rate when the amount it
///   produces overflows.
///
/// # Example
///
/// ```
/// use laytime_engine::calculation::settle;
/// use laytime_engine::models::{Direction, LaytimeDuration, TermsConfig};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut terms = TermsConfig::new(LaytimeDuration::from_days(Decimal::from(4)));
/// terms.demurrage_rate = Some(Decimal::from(16_667));
///
/// let used = LaytimeDuration::from_days(Decimal::from_str("5.5").unwrap());
/// let settlement = settle(used, &terms).unwrap();
/// assert_eq!(settlement.direction, Direction::Demurrage);
/// assert_eq!(settlement.amount, Decimal::from_str("25000.50").unwrap());
/// ```
pub fn settle(used: LaytimeDuration, terms: &TermsConfig) -> EngineResult<Settlement> {
    let differential = used - terms.allowed_laytime;
    let units = terms.rate_basis.units_of(differential);

    let (direction, amount) = if differential > LaytimeDuration::ZERO {
        let rate = terms
            .demurrage_rate
            .ok_or_else(|| EngineError::MissingTerms {
                field: "demurrage_rate".to_string(),
            })?;
        (Direction::Demurrage, charge(units, rate, "demurrage_rate")?)
    } else if differential < LaytimeDuration::ZERO {
        match terms.despatch_rate {
            Some(rate) if terms.despatch_payable() => {
                (Direction::Despatch, charge(units, rate, "despatch_rate")?)
            }
            _ => (Direction::None, Decimal::ZERO),
        }
    } else {
        (Direction::None, Decimal::ZERO)
    };

    Ok(Settlement {
        differential,
        direction,
        amount: round_currency(amount),
    })
}

fn charge(units: Decimal, rate: Decimal, field: &str) -> EngineResult<Decimal> {
    units
        .checked_mul(rate)
        .ok_or_else(|| EngineError::InvalidTerms {
            field: field.to_string(),
            message: format!("{} x {} overflows the amount", units, rate),
        })
}

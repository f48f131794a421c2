//! Request types for the Laytime Calculation Engine API.
//!
//! This module defines the JSON request structures and maps them into the
//! strongly-typed engine models before anything reaches the engine.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ExceptionRule, LaytimeDuration, RateBasis, RoundingUnit, SofEvent, SofEventKind, TermsConfig,
};

/// Request body for `/calculate` and `PUT /claims/:claim_id`.
///
/// Contains the Statement-of-Facts events and the terms to apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The Statement-of-Facts events, in any order.
    #[serde(default)]
    pub events: Vec<SofEventRequest>,
    /// The charter-party terms.
    pub terms: TermsRequest,
}

/// A Statement-of-Facts event in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SofEventRequest {
    /// Unique identifier for the event.
    pub id: String,
    /// The kind of event.
    pub kind: SofEventKind,
    /// Free-text description.
    #[serde(default)]
    pub label: String,
    /// When the event started.
    pub from: NaiveDateTime,
    /// When the event ended. Omitted for point events such as NOR tendered.
    #[serde(default)]
    pub to: Option<NaiveDateTime>,
    /// Explicit counting rate (0-100).
    #[serde(default)]
    pub rate: Option<Decimal>,
}

/// Charter-party terms in a request.
///
/// The allowance may be given in days or in hours, but not both. When a
/// `preset` is named, its rules are evaluated after `exception_rules`, and its
/// rounding unit and rate basis apply unless overridden here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermsRequest {
    /// Allowed laytime in days.
    #[serde(default)]
    pub allowed_laytime_days: Option<Decimal>,
    /// Allowed laytime in hours.
    #[serde(default)]
    pub allowed_laytime_hours: Option<Decimal>,
    /// Demurrage rate per rate-basis unit.
    #[serde(default)]
    pub demurrage_rate: Option<Decimal>,
    /// Despatch rate per rate-basis unit.
    #[serde(default)]
    pub despatch_rate: Option<Decimal>,
    /// The unit the rates are quoted in.
    #[serde(default)]
    pub rate_basis: Option<RateBasis>,
    /// Unit the total laytime used is rounded to.
    #[serde(default)]
    pub rounding_unit: Option<RoundingUnit>,
    /// Code of a configured terms preset (e.g. "shex").
    #[serde(default)]
    pub preset: Option<String>,
    /// Claim-specific exception rules.
    #[serde(default)]
    pub exception_rules: Vec<ExceptionRule>,
}

impl From<SofEventRequest> for SofEvent {
    fn from(req: SofEventRequest) -> Self {
        SofEvent {
            id: req.id,
            kind: req.kind,
            label: req.label,
            from: req.from,
            to: req.to.unwrap_or(req.from),
            rate: req.rate,
        }
    }
}

impl TermsRequest {
    /// Resolves the request into engine terms, merging in any named preset.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingTerms`] if no allowance is given
    /// - [`EngineError::InvalidTerms`] if the allowance is given in both units
    ///   or is too large to represent
    /// - [`EngineError::PresetNotFound`] if the named preset is not configured
    pub fn into_terms(self, config: &ConfigLoader) -> EngineResult<TermsConfig> {
        let allowed_laytime = match (self.allowed_laytime_days, self.allowed_laytime_hours) {
            (Some(days), None) => {
                LaytimeDuration::checked_from_days(days).ok_or_else(allowance_overflow)?
            }
            (None, Some(hours)) => {
                LaytimeDuration::checked_from_hours(hours).ok_or_else(allowance_overflow)?
            }
            (Some(_), Some(_)) => {
                return Err(EngineError::InvalidTerms {
                    field: "allowed_laytime".to_string(),
                    message: "give allowed_laytime_days or allowed_laytime_hours, not both"
                        .to_string(),
                });
            }
            (None, None) => {
                return Err(EngineError::MissingTerms {
                    field: "allowed_laytime".to_string(),
                });
            }
        };

        let mut terms = TermsConfig {
            allowed_laytime,
            demurrage_rate: self.demurrage_rate,
            despatch_rate: self.despatch_rate,
            rate_basis: self.rate_basis.unwrap_or_default(),
            exception_rules: self.exception_rules,
            rounding_unit: self.rounding_unit.unwrap_or_default(),
        };

        if let Some(code) = &self.preset {
            let preset = config.get_preset(code)?;
            preset.apply_to(&mut terms);
            terms.rate_basis = self.rate_basis.unwrap_or(preset.rate_basis);
            terms.rounding_unit = self.rounding_unit.unwrap_or(preset.rounding_unit);
        }

        Ok(terms)
    }
}

fn allowance_overflow() -> EngineError {
    EngineError::InvalidTerms {
        field: "allowed_laytime".to_string(),
        message: "allowance is too large".to_string(),
    }
}

impl CalculationRequest {
    /// Maps the request into engine events and terms.
    pub fn into_inputs(self, config: &ConfigLoader) -> EngineResult<(Vec<SofEvent>, TermsConfig)> {
        let terms = self.terms.into_terms(config)?;
        let events = self.events.into_iter().map(Into::into).collect();
        Ok((events, terms))
    }
}

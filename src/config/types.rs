//! Configuration types for charter-party terms presets.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML preset files.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{ExceptionRule, RateBasis, RoundingUnit, TermsConfig};

/// A named set of charter-party laytime terms (e.g. SHINC, SHEX).
///
/// A preset carries everything about the terms that is common to every claim
/// using them; allowance and rates remain claim-specific.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsPreset {
    /// Short lowercase code (e.g. "shex").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Longer description of what the terms except.
    #[serde(default)]
    pub description: String,
    /// Unit the total laytime used is rounded to.
    #[serde(default)]
    pub rounding_unit: RoundingUnit,
    /// The unit demurrage and despatch rates are quoted in.
    #[serde(default)]
    pub rate_basis: RateBasis,
    /// Ordered exception rules.
    #[serde(default)]
    pub exception_rules: Vec<ExceptionRule>,
}

impl TermsPreset {
    /// Checks every rule's rate lies within `[0, 100]`.
    pub fn validate(&self) -> EngineResult<()> {
        for (index, rule) in self.exception_rules.iter().enumerate() {
            rule.validate(index)?;
        }
        Ok(())
    }

    /// Applies the preset beneath claim-specific terms.
    ///
    /// The preset's rules are appended after any rules already on `terms`, so
    /// claim-specific rules are evaluated first.
    pub fn apply_to(&self, terms: &mut TermsConfig) {
        terms
            .exception_rules
            .extend(self.exception_rules.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{LaytimeDuration, RulePattern, SofEventKind};
    use rust_decimal::Decimal;

    const SHEX_YAML: &str = r#"
code: shex
name: Sundays and Holidays Excepted
rounding_unit: minute
exception_rules:
  - pattern: { match: label, value: Sunday }
    rate: 0
    description: Sundays excepted
  - pattern: { match: kind, value: weather_interruption }
    rate: 50
"#;

    #[test]
    fn test_preset_deserializes_from_yaml() {
        let preset: TermsPreset = serde_yaml::from_str(SHEX_YAML).unwrap();

        assert_eq!(preset.code, "shex");
        assert_eq!(preset.rounding_unit, RoundingUnit::Minute);
        assert_eq!(preset.rate_basis, RateBasis::PerDay);
        assert_eq!(preset.exception_rules.len(), 2);
        assert_eq!(
            preset.exception_rules[0].pattern,
            RulePattern::Label("Sunday".to_string())
        );
        assert_eq!(
            preset.exception_rules[1].pattern,
            RulePattern::Kind(SofEventKind::WeatherInterruption)
        );
        assert_eq!(preset.exception_rules[1].rate, Decimal::from(50));
        assert_eq!(preset.exception_rules[1].description, "");
    }

    #[test]
    fn test_apply_appends_preset_rules() {
        let preset: TermsPreset = serde_yaml::from_str(SHEX_YAML).unwrap();
        let mut terms = TermsConfig::new(LaytimeDuration::from_days(Decimal::from(4)));
        terms.exception_rules.push(ExceptionRule {
            pattern: RulePattern::Label("Shifting".to_string()),
            rate: Decimal::ZERO,
            description: String::new(),
        });

        preset.apply_to(&mut terms);

        assert_eq!(terms.exception_rules.len(), 3);
        assert_eq!(
            terms.exception_rules[0].pattern,
            RulePattern::Label("Shifting".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_bad_rule() {
        let mut preset: TermsPreset = serde_yaml::from_str(SHEX_YAML).unwrap();
        preset.exception_rules[1].rate = Decimal::from(200);

        assert!(matches!(
            preset.validate(),
            Err(EngineError::InvalidTerms { field, .. }) if field == "exception_rules[1].rate"
        ));
    }
}

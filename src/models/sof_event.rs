//! Statement-of-Facts event model.
//!
//! This module defines the [`SofEvent`] and [`SofEventKind`] types that
//! describe timed occurrences during a vessel's port stay.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::LaytimeDuration;

/// The closed set of event kinds recorded in a Statement of Facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SofEventKind {
    /// Notice of Readiness tendered. Usually a point event.
    NorTendered,
    /// Loading commenced.
    LoadingStart,
    /// Loading stopped or completed.
    LoadingStop,
    /// Discharging commenced.
    DischargingStart,
    /// Discharging stopped or completed.
    DischargingStop,
    /// Weather prevented work (rain, swell, wind).
    WeatherInterruption,
    /// Any other named deduction, identified by its label (e.g. "Sunday SHEX").
    OtherNamedDeduction,
}

impl fmt::Display for SofEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SofEventKind::NorTendered => "NOR Tendered",
            SofEventKind::LoadingStart => "Loading Start",
            SofEventKind::LoadingStop => "Loading Stop",
            SofEventKind::DischargingStart => "Discharging Start",
            SofEventKind::DischargingStop => "Discharging Stop",
            SofEventKind::WeatherInterruption => "Weather Interruption",
            SofEventKind::OtherNamedDeduction => "Other Named Deduction",
        };
        write!(f, "{}", name)
    }
}

/// A timed occurrence during a vessel's port stay.
///
/// `to` must not be earlier than `from`. A zero-length event (such as NOR
/// tendered) is valid and contributes no elapsed time.
///
/// # Example
///
/// ```
/// use laytime_engine::models::{SofEvent, SofEventKind};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let from = NaiveDateTime::parse_from_str("2025-11-20 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let to = NaiveDateTime::parse_from_str("2025-11-20 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let rain = SofEvent::new("sof_001", SofEventKind::WeatherInterruption, "Rain", from, to)
///     .with_rate(Decimal::ZERO);
/// assert_eq!(rain.elapsed().as_hours(), Decimal::from(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SofEvent {
    /// Unique identifier for the event.
    pub id: String,
    /// The kind of event.
    pub kind: SofEventKind,
    /// Free-text description, used for exception matching and display.
    #[serde(default)]
    pub label: String,
    /// When the event started.
    pub from: NaiveDateTime,
    /// When the event ended.
    pub to: NaiveDateTime,
    /// Percentage (0-100) of the interval that counts toward laytime.
    ///
    /// `None` means the rate is resolved from the terms' exception rules.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl SofEvent {
    /// Creates an event with no explicit rate.
    pub fn new(
        id: impl Into<String>,
        kind: SofEventKind,
        label: impl Into<String>,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            from,
            to,
            rate: None,
        }
    }

    /// Creates a zero-length event at `at`.
    pub fn point(
        id: impl Into<String>,
        kind: SofEventKind,
        label: impl Into<String>,
        at: NaiveDateTime,
    ) -> Self {
        Self::new(id, kind, label, at, at)
    }

    /// Returns the event with an explicit counting rate.
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Returns the raw time between `from` and `to`.
    pub fn elapsed(&self) -> LaytimeDuration {
        LaytimeDuration::between(self.from, self.to)
    }

    /// Returns `true` if the event has no duration.
    pub fn is_point_event(&self) -> bool {
        self.from == self.to
    }

    /// Checks that the event's interval is not reversed.
    pub fn validate_interval(&self) -> EngineResult<()> {
        if self.to < self.from {
            return Err(EngineError::InvalidEvent {
                event_id: self.id.clone(),
                message: format!("'to' ({}) is before 'from' ({})", self.to, self.from),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_point_event_has_zero_elapsed() {
        let nor = SofEvent::point(
            "sof_001",
            SofEventKind::NorTendered,
            "NOR Tendered",
            make_datetime("2025-11-20 12:00:00"),
        );
        assert!(nor.is_point_event());
        assert!(nor.elapsed().is_zero());
        assert!(nor.validate_interval().is_ok());
    }

    #[test]
    fn test_reversed_interval_is_invalid() {
        let event = SofEvent::new(
            "sof_bad",
            SofEventKind::LoadingStart,
            "Loading",
            make_datetime("2025-11-20 12:00:00"),
            make_datetime("2025-11-20 11:00:00"),
        );

        match event.validate_interval() {
            Err(EngineError::InvalidEvent { event_id, message }) => {
                assert_eq!(event_id, "sof_bad");
                assert!(message.contains("before"));
            }
            other => panic!("Expected InvalidEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_event_deserialization_defaults() {
        let json = r#"{
            "id": "sof_002",
            "kind": "weather_interruption",
            "from": "2025-11-20T10:00:00",
            "to": "2025-11-20T12:00:00"
        }"#;

        let event: SofEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, SofEventKind::WeatherInterruption);
        assert_eq!(event.label, "");
        assert_eq!(event.rate, None);
    }

    #[test]
    fn test_event_kind_serialization() {
        let json = serde_json::to_string(&SofEventKind::NorTendered).unwrap();
        assert_eq!(json, "\"nor_tendered\"");

        let kind: SofEventKind = serde_json::from_str("\"other_named_deduction\"").unwrap();
        assert_eq!(kind, SofEventKind::OtherNamedDeduction);
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(SofEventKind::NorTendered.to_string(), "NOR Tendered");
        assert_eq!(
            SofEventKind::WeatherInterruption.to_string(),
            "Weather Interruption"
        );
    }
}

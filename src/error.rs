//! Error types for the Laytime Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating laytime,
//! loading charter-party term presets, or reaching the claim store.

use thiserror::Error;

/// The main error type for the Laytime Calculation Engine.
///
/// Every failure is fatal for the call that produced it. The engine never
/// returns a partially computed result alongside an error.
///
/// # Example
///
/// ```
/// use laytime_engine::error::EngineError;
///
/// let error = EngineError::MissingTerms {
///     field: "demurrage_rate".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing terms field: demurrage_rate");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A Statement-of-Facts event was invalid (negative duration, rate out of range).
    #[error("Invalid event '{event_id}': {message}")]
    InvalidEvent {
        /// The ID of the offending event.
        event_id: String,
        /// A description of what made the event invalid.
        message: String,
    },

    /// A terms field required for the calculation was absent.
    #[error("Missing terms field: {field}")]
    MissingTerms {
        /// The name of the missing field.
        field: String,
    },

    /// A terms field was present but held an unusable value.
    #[error("Invalid terms field '{field}': {message}")]
    InvalidTerms {
        /// The name of the invalid field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A charter-party terms preset was not found in the configuration.
    #[error("Terms preset not found: {code}")]
    PresetNotFound {
        /// The preset code that was not found.
        code: String,
    },

    /// A claim was not found for the requesting tenant.
    #[error("Claim not found: {claim_id}")]
    ClaimNotFound {
        /// The claim identifier that was requested.
        claim_id: String,
    },

    /// The claim store failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

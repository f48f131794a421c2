//! Response types for the Laytime Calculation Engine API.
//!
//! This module defines the error response structures and maps engine errors
//! onto HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing tenant error response.
    pub fn missing_tenant() -> Self {
        Self::with_details(
            "MISSING_TENANT",
            "missing tenant",
            "The x-tenant-id header is required for claim operations",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::InvalidEvent { event_id, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details("INVALID_EVENT", message, event_id),
            ),
            EngineError::MissingTerms { field } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details("MISSING_TERMS", message, field),
            ),
            EngineError::InvalidTerms { field, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details("INVALID_TERMS", message, field),
            ),
            EngineError::PresetNotFound { code } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "PRESET_NOT_FOUND",
                    message,
                    format!("The terms preset '{}' is not configured", code),
                ),
            ),
            EngineError::ClaimNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("CLAIM_NOT_FOUND", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::StoreError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Claim store failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_event_maps_to_422_with_event_id() {
        let response: ApiErrorResponse = EngineError::InvalidEvent {
            event_id: "sof_bad".to_string(),
            message: "'to' is before 'from'".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "INVALID_EVENT");
        assert_eq!(response.error.details.as_deref(), Some("sof_bad"));
    }

    #[test]
    fn test_missing_terms_maps_to_422_with_field() {
        let response: ApiErrorResponse = EngineError::MissingTerms {
            field: "demurrage_rate".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "MISSING_TERMS");
        assert_eq!(response.error.details.as_deref(), Some("demurrage_rate"));
    }

    #[test]
    fn test_claim_not_found_maps_to_404() {
        let response: ApiErrorResponse = EngineError::ClaimNotFound {
            claim_id: "CLM-404".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "CLAIM_NOT_FOUND");
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let response: ApiErrorResponse = EngineError::StoreError {
            message: "lock poisoned".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "STORE_ERROR");
    }

    #[test]
    fn test_api_error_omits_empty_details() {
        let json = serde_json::to_string(&ApiError::malformed_json("bad")).unwrap();
        assert_eq!(json, r#"{"code":"MALFORMED_JSON","message":"bad"}"#);
    }
}

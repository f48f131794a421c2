//! HTTP request handlers for the Laytime Calculation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate;
use crate::error::EngineError;
use crate::store::{ClaimRecord, TenantId, recalculate_claim};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the tenant for claim operations.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/presets", get(presets_handler))
        .route("/claims/:claim_id", put(put_claim_handler))
        .route("/claims/:claim_id/calculate", post(recalculate_handler))
        .route("/claims/:claim_id/calculations", get(history_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Runs the engine over the events and terms in the body and returns the
/// result without storing anything.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let (events, terms) = match request.into_inputs(state.config()) {
        Ok(inputs) => inputs,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match calculate(&events, &terms) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                events_count = events.len(),
                direction = ?result.direction,
                amount = %result.amount,
                laytime_used = %result.total_laytime_used,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /presets endpoint.
async fn presets_handler(State(state): State<AppState>) -> Response {
    let presets: Vec<_> = state.config().presets().cloned().collect();
    json_response(StatusCode::OK, presets)
}

/// Handler for PUT /claims/:claim_id endpoint.
///
/// Stores a claim's events and resolved terms for the requesting tenant.
async fn put_claim_handler(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Some(tenant) = tenant_from_headers(&headers) else {
        return missing_tenant_response(correlation_id);
    };
    info!(
        correlation_id = %correlation_id,
        tenant_id = %tenant,
        claim_id = %claim_id,
        "Storing claim"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let (events, terms) = match request.into_inputs(state.config()) {
        Ok(inputs) => inputs,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let record = ClaimRecord {
        claim_id,
        events,
        terms,
    };
    match state.store().put_claim(&tenant, record.clone()) {
        Ok(()) => json_response(StatusCode::OK, record),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /claims/:claim_id/calculate endpoint.
///
/// Recalculates a stored claim and returns the new snapshot.
async fn recalculate_handler(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Some(tenant) = tenant_from_headers(&headers) else {
        return missing_tenant_response(correlation_id);
    };

    let start_time = Instant::now();
    match recalculate_claim(state.store(), &tenant, &claim_id) {
        Ok(snapshot) => {
            info!(
                correlation_id = %correlation_id,
                tenant_id = %tenant,
                claim_id = %claim_id,
                calculation_id = %snapshot.calculation_id,
                events_count = snapshot.result.ledger.len(),
                direction = ?snapshot.result.direction,
                amount = %snapshot.result.amount,
                duration_us = start_time.elapsed().as_micros(),
                "Claim recalculated"
            );
            json_response(StatusCode::CREATED, snapshot)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /claims/:claim_id/calculations endpoint.
async fn history_handler(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Some(tenant) = tenant_from_headers(&headers) else {
        return missing_tenant_response(correlation_id);
    };

    match state.store().snapshots(&tenant, &claim_id) {
        Ok(snapshots) => json_response(StatusCode::OK, snapshots),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn tenant_from_headers(headers: &HeaderMap) -> Option<TenantId> {
    headers
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(TenantId::new)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn missing_tenant_response(correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, "Missing tenant header");
    json_response(StatusCode::UNAUTHORIZED, ApiError::missing_tenant())
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_tenant_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(tenant_from_headers(&headers), None);

        headers.insert(TENANT_HEADER, HeaderValue::from_static("  "));
        assert_eq!(tenant_from_headers(&headers), None);

        headers.insert(TENANT_HEADER, HeaderValue::from_static(" tenant_a "));
        assert_eq!(tenant_from_headers(&headers), Some(TenantId::new("tenant_a")));
    }
}

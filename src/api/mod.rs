//! HTTP API module for the Laytime Calculation Engine.
//!
//! This module exposes the engine and the tenant-scoped claim store as JSON
//! endpoints. Request bodies are mapped into strongly-typed models here,
//! before they reach the engine.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{TENANT_HEADER, create_router};
pub use request::{CalculationRequest, SofEventRequest, TermsRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

//! Egress policy handlers.

use axum::{Json, extract::State};

use crate::dto::{ValidateEndpointRequest, ValidateEndpointResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// Validate an outbound hostname against the egress policy.
///
/// Denials count as security violations exactly like internal calls.
pub async fn validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateEndpointRequest>,
) -> Result<Json<ValidateEndpointResponse>, HttpError> {
    if req.hostname.trim().is_empty() {
        return Err(HttpError::BadRequest("hostname cannot be empty".to_string()));
    }

    let result = state.service.validate_endpoint(&req.hostname);
    Ok(Json(ValidateEndpointResponse {
        hostname: req.hostname,
        allowed: result.allowed,
        reason: result.reason,
    }))
}

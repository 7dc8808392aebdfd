//! Axum-specific error types and mappings.
//!
//! Maps `ServiceError` to HTTP status codes and JSON response bodies.

use airgap_core::{EngineError, ServiceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The model has not been initialized yet.
    #[error("{0}")]
    NotInitialized(String),

    /// Initialization was refused by the security gate.
    #[error("{message}")]
    SecurityGate { message: String, check: String },

    /// The inference engine is unavailable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The inference engine did not answer in time.
    #[error("Gateway timeout: {0}")]
    Timeout(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    error_type: Option<&'static str>,
    /// Optional additional metadata for specific error types
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, error_type, metadata) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None, None),
            Self::NotInitialized(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                msg,
                Some("NOT_INITIALIZED"),
                None,
            ),
            Self::SecurityGate { message, check } => (
                StatusCode::SERVICE_UNAVAILABLE,
                message,
                Some("SECURITY_CHECK_FAILED"),
                Some(serde_json::json!({ "check": check })),
            ),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None, None),
            Self::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg, None, None),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None, None),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            error_type,
            metadata,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotInitialized => Self::NotInitialized(err.to_string()),
            ServiceError::SecurityGate { check, .. } => Self::SecurityGate {
                message: err.to_string(),
                check: check.to_string(),
            },
            ServiceError::Engine(engine_err) => engine_err.into(),
            ServiceError::Config(config_err) => Self::BadRequest(config_err.to_string()),
        }
    }
}

impl From<EngineError> for HttpError {
    fn from(err: EngineError) -> Self {
        match err.suggested_status_code() {
            503 => Self::ServiceUnavailable(err.to_string()),
            504 => Self::Timeout(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

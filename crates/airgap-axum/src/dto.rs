//! Request and response bodies that exist only at the HTTP boundary.
//!
//! Domain types (`InferenceResult`, `AnalysisResult`, `StatisticsSnapshot`,
//! `SecurityReport`, `HealthStatus`, `PollutionReport`) are serialized as-is.

use airgap_core::{InferenceOverrides, SecurityLevel, ServiceState};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub classification: SecurityLevel,
}

impl GenerateRequest {
    pub const fn overrides(&self) -> InferenceOverrides {
        InferenceOverrides {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Body of `POST /api/endpoints/validate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateEndpointRequest {
    pub hostname: String,
}

/// Response of `POST /api/endpoints/validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateEndpointResponse {
    pub hostname: String,
    pub allowed: bool,
    pub reason: String,
}

/// Response of `POST /api/initialize`.
#[derive(Debug, Clone, Serialize)]
pub struct InitializeResponse {
    pub state: ServiceState,
    pub initialization_time_seconds: Option<f64>,
}

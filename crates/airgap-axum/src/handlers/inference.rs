//! Lifecycle and inference handlers.

use airgap_core::{AnalysisResult, InferenceResult, PollutionReport};
use axum::{Json, extract::State};

use crate::dto::{GenerateRequest, InitializeResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// Initialize the service (idempotent).
pub async fn initialize(
    State(state): State<AppState>,
) -> Result<Json<InitializeResponse>, HttpError> {
    state.service.try_initialize().await?;

    let stats = state.service.statistics();
    Ok(Json(InitializeResponse {
        state: state.service.state(),
        initialization_time_seconds: stats.initialization_time_seconds,
    }))
}

/// Generate text with the local model.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<InferenceResult>, HttpError> {
    let result = state
        .service
        .generate(&req.prompt, req.overrides(), req.classification)
        .await?;
    Ok(Json(result))
}

/// Analyze a pollution report.
pub async fn analyze(
    State(state): State<AppState>,
    Json(report): Json<PollutionReport>,
) -> Result<Json<AnalysisResult>, HttpError> {
    Ok(Json(state.service.analyze_pollution_report(&report).await?))
}

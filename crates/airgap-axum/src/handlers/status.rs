//! Monitoring handlers - health, statistics and security posture.

use airgap_core::{HealthStatus, SecurityReport, StatisticsSnapshot};
use axum::{Json, extract::State};

use crate::state::AppState;

/// Health probe. Re-runs the security gate on every call.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.service.health_check())
}

/// Usage and deployment statistics.
pub async fn stats(State(state): State<AppState>) -> Json<StatisticsSnapshot> {
    Json(state.service.statistics())
}

/// Run the security gate and return the full per-check report.
pub async fn security(State(state): State<AppState>) -> Json<SecurityReport> {
    Json(state.service.security_report())
}

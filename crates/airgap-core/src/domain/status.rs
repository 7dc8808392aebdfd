//! Monitoring snapshots exposed to adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::inference::serialize_rfc3339;

/// Lifecycle state of the service. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Uninitialized,
    Ready,
}

/// Usage counters and static deployment facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub is_initialized: bool,
    pub model_name: String,
    pub inference_count: u64,
    pub total_tokens_processed: u64,
    /// `None` until the first successful initialization.
    pub initialization_time_seconds: Option<f64>,
    pub security_violations: u64,
    pub air_gapped_mode: bool,
    pub gpu_count: u32,
    pub quantization: String,
}

/// Probe-friendly health label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Initializing,
}

/// Health probe response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub model_loaded: bool,
    pub security_check_passed: bool,
    pub inference_count: u64,
}

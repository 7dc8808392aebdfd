//! Audit events emitted by the policy engine, the security gate and the
//! service pipeline.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "security_violation", "hostname": "api.openai.com", "rule": "api.openai.com", "total": 3 }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{CheckOutcome, SecurityCheck, SecurityLevel};

/// Canonical audit event union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// An endpoint validation was denied.
    SecurityViolation {
        hostname: String,
        /// Matched deny pattern, or the air-gapped default-deny reason.
        rule: String,
        /// Violation count after this one.
        total: u64,
    },

    /// A security gate check finished.
    SecurityCheckCompleted {
        check: SecurityCheck,
        outcome: CheckOutcome,
    },

    /// A full security gate run finished.
    SecurityGateCompleted {
        passed: bool,
        checks_passed: usize,
        checks_total: usize,
    },

    /// The service reached the ready state.
    ServiceInitialized {
        model_name: String,
        initialization_time_ms: f64,
    },

    /// Initialization was aborted; the service stays uninitialized.
    InitializationFailed { reason: String },

    /// An inference request was accepted by the pipeline.
    InferenceStarted {
        classification: SecurityLevel,
        prompt_length: usize,
    },

    /// An inference request completed and counters were updated.
    InferenceCompleted {
        classification: SecurityLevel,
        prompt_length: usize,
        tokens_generated: u64,
        inference_time_ms: f64,
    },
}

impl AuditEvent {
    /// Create a security violation event.
    pub fn violation(hostname: impl Into<String>, rule: impl Into<String>, total: u64) -> Self {
        Self::SecurityViolation {
            hostname: hostname.into(),
            rule: rule.into(),
            total,
        }
    }

    /// Create a check completion event.
    pub const fn check_completed(check: SecurityCheck, outcome: CheckOutcome) -> Self {
        Self::SecurityCheckCompleted { check, outcome }
    }

    /// Stable name of the event variant, matching the wire `type` tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SecurityViolation { .. } => "security_violation",
            Self::SecurityCheckCompleted { .. } => "security_check_completed",
            Self::SecurityGateCompleted { .. } => "security_gate_completed",
            Self::ServiceInitialized { .. } => "service_initialized",
            Self::InitializationFailed { .. } => "initialization_failed",
            Self::InferenceStarted { .. } => "inference_started",
            Self::InferenceCompleted { .. } => "inference_completed",
        }
    }
}

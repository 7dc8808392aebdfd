//! Audit sink port.
//!
//! The service never logs through a process-wide logger for audit purposes;
//! it is handed a sink at construction and reports every security-relevant
//! event to it.

use crate::domain::CheckOutcome;
use crate::events::AuditEvent;

/// Trait for recording audit events.
///
/// # Implementations
///
/// - `NoopAuditSink` - discards everything
/// - `TracingAuditSink` - forwards events to `tracing` under `airgap.audit`
/// - `RecordingAuditSink` (test-utils) - keeps events in memory for assertions
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    ///
    /// Called from inside the pipeline lock, so implementations must not
    /// block.
    fn record(&self, event: AuditEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl NoopAuditSink {
    pub const fn new() -> Self {
        Self
    }
}

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: AuditEvent) {}
}

/// Writes audit events as structured `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub const fn new() -> Self {
        Self
    }
}

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        match event {
            AuditEvent::SecurityViolation {
                hostname,
                rule,
                total,
            } => tracing::warn!(
                target: "airgap.audit",
                %hostname,
                %rule,
                total,
                "Security violation: blocked endpoint"
            ),
            AuditEvent::SecurityCheckCompleted { check, outcome } => match outcome {
                CheckOutcome::Passed(detail) => {
                    tracing::info!(target: "airgap.audit", %check, %detail, "Security check passed");
                }
                CheckOutcome::Warning(detail) => {
                    tracing::warn!(target: "airgap.audit", %check, %detail, "Security check warning");
                }
                CheckOutcome::Failed(detail) => {
                    tracing::error!(target: "airgap.audit", %check, %detail, "Security check failed");
                }
            },
            AuditEvent::SecurityGateCompleted {
                passed,
                checks_passed,
                checks_total,
            } => {
                if passed {
                    tracing::info!(
                        target: "airgap.audit",
                        checks_passed,
                        checks_total,
                        "Security verification passed"
                    );
                } else {
                    tracing::error!(
                        target: "airgap.audit",
                        checks_passed,
                        checks_total,
                        "Security verification failed"
                    );
                }
            }
            AuditEvent::ServiceInitialized {
                model_name,
                initialization_time_ms,
            } => tracing::info!(
                target: "airgap.audit",
                %model_name,
                initialization_time_ms,
                "Model initialized"
            ),
            AuditEvent::InitializationFailed { reason } => {
                tracing::error!(target: "airgap.audit", %reason, "Initialization aborted");
            }
            AuditEvent::InferenceStarted {
                classification,
                prompt_length,
            } => tracing::info!(
                target: "airgap.audit",
                classification = classification.as_str(),
                prompt_length,
                "Inference request"
            ),
            AuditEvent::InferenceCompleted {
                classification,
                prompt_length,
                tokens_generated,
                inference_time_ms,
            } => tracing::info!(
                target: "airgap.audit",
                classification = classification.as_str(),
                prompt_length,
                tokens_generated,
                inference_time_ms,
                "Inference complete"
            ),
        }
    }
}

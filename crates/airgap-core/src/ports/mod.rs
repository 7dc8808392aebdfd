//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No engine, GPU or transport types in any signature
//! - The inference engine is the only async port; everything else is
//!   cheap and synchronous
//! - Every port has a trivial in-core implementation so adapters can opt out

pub mod audit_sink;
pub mod clock;
pub mod credential_probe;
pub mod inference_engine;
pub mod recommendations;

use std::sync::Arc;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::SecurityCheck;

pub use audit_sink::{AuditSink, NoopAuditSink, TracingAuditSink};
pub use clock::{Clock, FixedClock, SystemClock};
pub use credential_probe::{CredentialProbe, EXTERNAL_PROVIDER_CREDENTIALS, NoCredentials};
pub use inference_engine::{EngineError, InferenceEngine, InferenceOutput};
#[cfg(test)]
pub use inference_engine::MockInferenceEngine;
pub use recommendations::{ANALYSIS_CONFIDENCE, RecommendationExtractor, StaticRecommendations};

/// Container for all collaborator trait objects.
///
/// Wired once at the adapter's composition root and handed to
/// `SecureLlmService::new`.
#[derive(Clone)]
pub struct ServiceDeps {
    /// Local model runtime.
    pub engine: Arc<dyn InferenceEngine>,
    /// Source of result and health timestamps.
    pub clock: Arc<dyn Clock>,
    /// Receiver of audit events.
    pub audit: Arc<dyn AuditSink>,
    /// Environment probe for the provider-identity check.
    pub credentials: Arc<dyn CredentialProbe>,
    /// Post-processor for pollution analyses.
    pub recommendations: Arc<dyn RecommendationExtractor>,
}

impl ServiceDeps {
    /// Wire an engine with the default collaborators: system clock,
    /// tracing audit sink, no credential findings, static recommendations.
    pub fn new(engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            engine,
            clock: Arc::new(SystemClock::new()),
            audit: Arc::new(TracingAuditSink::new()),
            credentials: Arc::new(NoCredentials),
            recommendations: Arc::new(StaticRecommendations),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProbe>) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn with_recommendations(
        mut self,
        recommendations: Arc<dyn RecommendationExtractor>,
    ) -> Self {
        self.recommendations = recommendations;
        self
    }
}

/// Core error type for the service.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes). `initialize() == false` and any of these errors are equivalent
/// "not ready" signals for callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// `generate` or `analyze` was called before a successful `initialize`.
    #[error("Model not initialized. Call initialize() first.")]
    NotInitialized,

    /// Initialization aborted because a critical security check failed.
    #[error("Security check '{check}' failed: {reason}")]
    SecurityGate {
        check: SecurityCheck,
        reason: String,
    },

    /// The inference engine failed; propagated unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Invalid configuration handed to the service.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    /// Returns true if this error means "the service is not servable yet".
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotInitialized | Self::SecurityGate { .. })
    }
}

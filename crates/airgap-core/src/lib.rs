//! Core domain, ports and services for the airgap secure inference service.
//!
//! Everything here is transport-agnostic. Adapters (`airgap-axum`,
//! `airgap-cli`) wire a concrete [`ports::InferenceEngine`] into
//! [`SecureLlmService`] and expose its operations.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, DEFAULT_ALLOW_LIST, DEFAULT_DENY_PATTERNS, EgressPolicyConfig, ModelConfig,
    SecurityConfig, ServiceConfig, validate_config,
};
pub use domain::{
    AnalysisResult, CheckOutcome, CheckResult, DomainPattern, EgressPolicy, HealthState,
    HealthStatus, InferenceMetadata, InferenceOverrides, InferenceRequest, InferenceResult,
    ModelIdentity, PollutionReport, Provider, SecurityAttestation, SecurityCheck, SecurityLevel,
    SecurityReport, ServiceState, Severity, StatisticsSnapshot, ValidationResult,
};
pub use events::AuditEvent;
pub use ports::{
    AuditSink, Clock, CredentialProbe, EngineError, InferenceEngine, InferenceOutput,
    RecommendationExtractor, ServiceDeps, ServiceError,
};
pub use services::{EndpointPolicyEngine, SecureLlmService, SecurityGate};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

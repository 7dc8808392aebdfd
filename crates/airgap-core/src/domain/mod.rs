//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (engines, clocks, transports).
//!
//! # Structure
//!
//! - `policy` - Egress policy, domain patterns, validation results
//! - `gate` - Security gate checks and reports
//! - `inference` - Requests, results, classification and provider identity
//! - `report` - Pollution reports, severity bands, analysis results
//! - `status` - Statistics and health snapshots

pub mod gate;
pub mod inference;
pub mod policy;
pub mod report;
pub mod status;

pub use gate::{CheckOutcome, CheckResult, SecurityCheck, SecurityReport};
pub use inference::{
    COMPLIANCE_TAGS, InferenceMetadata, InferenceOverrides, InferenceRequest, InferenceResult,
    ModelIdentity, Provider, SecurityAttestation, SecurityLevel, word_count,
};
pub use policy::{
    DomainPattern, EgressPolicy, ValidationReason, ValidationResult, normalize_hostname,
};
pub use report::{AnalysisResult, PollutionReport, Severity, build_analysis_prompt};
pub use status::{HealthState, HealthStatus, ServiceState, StatisticsSnapshot};

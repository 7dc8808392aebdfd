//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They don't know
//! about concrete engines, transports or environments.

mod endpoint_policy;
mod secure_llm;
mod security_gate;

pub use endpoint_policy::EndpointPolicyEngine;
pub use secure_llm::{ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE, SecureLlmService};
pub use security_gate::{EXTERNAL_API_PROBES, SecurityGate};

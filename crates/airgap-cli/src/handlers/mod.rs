//! Command handlers that delegate to `SecureLlmService`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call service methods
//!   3. Format output for the terminal

pub mod analyze;
pub mod config;
pub mod generate;
pub mod security;
pub mod serve;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use airgap_core::ports::{NoopAuditSink, ServiceDeps};
    use airgap_core::test_utils::ScriptedEngine;
    use airgap_core::{SecureLlmService, ServiceConfig};

    use crate::bootstrap::CliContext;

    pub fn context(config: ServiceConfig) -> (CliContext, Arc<ScriptedEngine>) {
        let engine = Arc::new(ScriptedEngine::new());
        let deps = ServiceDeps::new(engine.clone()).with_audit(Arc::new(NoopAuditSink::new()));
        let service = Arc::new(SecureLlmService::new(config, deps).unwrap());
        (CliContext { service }, engine)
    }
}

//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Configuration file loading (JSON, partial files allowed)
//! - Simulated local engine and environment credential probe (via airgap-runtime)
//! - The secure inference service (via airgap-core)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use airgap_core::ports::ServiceDeps;
use airgap_core::{SecureLlmService, ServiceConfig};
use airgap_runtime::{EnvCredentialProbe, SimulatedLocalEngine, SimulatedTimings};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Optional JSON configuration file.
    pub config_path: Option<PathBuf>,
    /// Latencies of the simulated model runtime.
    pub timings: SimulatedTimings,
}

impl CliConfig {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            timings: SimulatedTimings::default(),
        }
    }

    /// Resolve the effective service configuration.
    pub fn service_config(&self) -> Result<ServiceConfig, CliError> {
        match &self.config_path {
            Some(path) => load_service_config(path),
            None => Ok(ServiceConfig::with_defaults()),
        }
    }
}

/// Read and validate a JSON configuration file.
pub fn load_service_config(path: &Path) -> Result<ServiceConfig, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    let config = ServiceConfig::from_json(&raw)?;

    tracing::info!(
        target: "airgap.config",
        path = %path.display(),
        model = %config.model.model_name,
        air_gapped = config.security.air_gapped_mode,
        "Loaded configuration file"
    );
    Ok(config)
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The secure inference service.
    pub service: Arc<SecureLlmService>,
}

impl CliContext {
    /// Initialize the service, mapping a refusal to a CLI error.
    pub async fn ready(&self) -> Result<&SecureLlmService, CliError> {
        self.service.try_initialize().await?;
        Ok(&self.service)
    }
}

/// Build the CLI context from resolved configuration.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let service_config = config.service_config()?;

    let deps = ServiceDeps::new(Arc::new(SimulatedLocalEngine::new(config.timings.clone())))
        .with_credentials(Arc::new(EnvCredentialProbe::from_process_env()));
    let service = Arc::new(SecureLlmService::new(service_config, deps)?);

    Ok(CliContext { service })
}

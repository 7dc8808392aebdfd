//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the HTTP adapter. All concrete port implementations are
//! instantiated here.

use std::sync::Arc;

use anyhow::Result;
use airgap_core::ports::{ServiceDeps, TracingAuditSink};
use airgap_core::{SecureLlmService, ServiceConfig};
use airgap_runtime::{EnvCredentialProbe, SimulatedLocalEngine, SimulatedTimings};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Run the security gate and load the model before accepting requests.
    pub initialize_on_start: bool,
    /// Latencies of the simulated model runtime.
    pub timings: SimulatedTimings,
}

impl ServerConfig {
    /// Bind to localhost:8000 and initialize eagerly.
    pub fn with_defaults() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors: CorsConfig::default(),
            initialize_on_start: true,
            timings: SimulatedTimings::default(),
        }
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The secure inference service.
    pub service: Arc<SecureLlmService>,
}

impl AxumContext {
    /// Wrap an already constructed service.
    pub const fn new(service: Arc<SecureLlmService>) -> Self {
        Self { service }
    }
}

/// Build the service with the production adapters.
///
/// When `initialize_on_start` is set, initialization is attempted once. A
/// failure is logged and the server still starts: `/health` reports
/// `initializing` and inference routes answer 503.
pub async fn bootstrap(service_config: ServiceConfig, config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        target: "airgap.bootstrap",
        model = %service_config.model.model_name,
        air_gapped = service_config.security.air_gapped_mode,
        deny_patterns = service_config.policy.deny_patterns.len(),
        allow_list = service_config.policy.allow_list.len(),
        "Axum bootstrap resolved configuration"
    );

    let deps = ServiceDeps::new(Arc::new(SimulatedLocalEngine::new(config.timings.clone())))
        .with_audit(Arc::new(TracingAuditSink::new()))
        .with_credentials(Arc::new(EnvCredentialProbe::from_process_env()));

    let service = Arc::new(SecureLlmService::new(service_config, deps)?);

    if config.initialize_on_start {
        if let Err(e) = service.try_initialize().await {
            tracing::warn!(
                target: "airgap.bootstrap",
                error = %e,
                "Service failed to initialize; serving in uninitialized state"
            );
        }
    }

    Ok(AxumContext::new(service))
}

/// Start the web server and serve until Ctrl+C.
pub async fn start_server(service_config: ServiceConfig, config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(service_config, &config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("airgap API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

//! Serve command handler - runs the HTTP API.

use airgap_axum::{ServerConfig, start_server};

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Arguments for the serve command.
#[derive(Debug, Clone)]
pub struct ServeArgs {
    pub host: String,
    pub port: u16,
    pub no_init: bool,
    pub allow_origins: Vec<String>,
}

/// Build the server configuration from CLI arguments.
pub fn server_config(config: &CliConfig, args: ServeArgs) -> ServerConfig {
    let server = ServerConfig {
        host: args.host,
        port: args.port,
        initialize_on_start: !args.no_init,
        timings: config.timings.clone(),
        ..ServerConfig::with_defaults()
    };

    if args.allow_origins.is_empty() {
        server
    } else {
        server.with_allowed_origins(args.allow_origins)
    }
}

/// Start the HTTP API and block until shutdown.
pub async fn execute(config: &CliConfig, args: ServeArgs) -> Result<(), CliError> {
    let service_config = config.service_config()?;
    let server = server_config(config, args);

    start_server(service_config, server)
        .await
        .map_err(|e| CliError::Service(format!("server error: {e:#}")))
}

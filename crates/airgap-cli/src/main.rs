//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers which delegate to `SecureLlmService`.
//! Errors are printed once and turned into sysexits-style exit codes.

use std::process::ExitCode;

use airgap_cli::handlers::serve::ServeArgs;
use airgap_cli::{Cli, CliConfig, CliError, Commands, ConfigCommand, bootstrap, handlers};
use airgap_core::InferenceOverrides;
use clap::{CommandFactory, Parser};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables before clap reads AIRGAP_CONFIG
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    airgap_cli::logging::init_logging(cli.verbose, cli.json);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = CliConfig::new(cli.config);
    match run(&config, command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1)))
        }
    }
}

async fn run(config: &CliConfig, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve {
            host,
            port,
            no_init,
            allow_origins,
        } => {
            let args = ServeArgs {
                host,
                port,
                no_init,
                allow_origins,
            };
            handlers::serve::execute(config, args).await
        }
        Commands::Generate {
            prompt,
            max_tokens,
            temperature,
            classification,
        } => {
            let ctx = bootstrap(config)?;
            let overrides = InferenceOverrides {
                max_tokens,
                temperature,
            };
            handlers::generate::execute(&ctx, &prompt, overrides, classification).await
        }
        Commands::Analyze { file } => {
            let ctx = bootstrap(config)?;
            handlers::analyze::execute(&ctx, file.as_deref()).await
        }
        Commands::CheckSecurity => {
            let ctx = bootstrap(config)?;
            handlers::security::check_security(&ctx)
        }
        Commands::Validate { hosts } => {
            let ctx = bootstrap(config)?;
            handlers::security::validate(&ctx, &hosts)
        }
        Commands::Stats => {
            let ctx = bootstrap(config)?;
            handlers::stats::execute(&ctx).await
        }
        Commands::Config {
            command: ConfigCommand::Show,
        } => handlers::config::show(&config.service_config()?),
    }
}

//! Generate command handler.

use airgap_core::{InferenceOverrides, SecurityLevel};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_json;

/// Initialize the service and print one generation as JSON.
pub async fn execute(
    ctx: &CliContext,
    prompt: &str,
    overrides: InferenceOverrides,
    classification: SecurityLevel,
) -> Result<(), CliError> {
    if prompt.trim().is_empty() {
        return Err(CliError::Arguments("prompt cannot be empty".to_string()));
    }

    let service = ctx.ready().await?;
    let result = service.generate(prompt, overrides, classification).await?;
    print_json(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::context;
    use airgap_core::ServiceConfig;

    #[tokio::test]
    async fn test_generate_initializes_first() {
        let (ctx, engine) = context(ServiceConfig::with_defaults());

        execute(&ctx, "hello", InferenceOverrides::default(), SecurityLevel::Public)
            .await
            .unwrap();

        assert_eq!(engine.weight_loads(), 1);
        assert_eq!(engine.runs(), 1);
        assert_eq!(ctx.service.statistics().inference_count, 1);
    }

    #[tokio::test]
    async fn test_blank_prompt_rejected() {
        let (ctx, engine) = context(ServiceConfig::with_defaults());
        let err = execute(&ctx, "   ", InferenceOverrides::default(), SecurityLevel::Public)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(engine.weight_loads(), 0);
    }

    #[tokio::test]
    async fn test_gate_refusal_is_unavailable() {
        let mut config = ServiceConfig::with_defaults();
        config.security.air_gapped_mode = false;
        let (ctx, engine) = context(config);

        let err = execute(&ctx, "hello", InferenceOverrides::default(), SecurityLevel::Public)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 69);
        assert_eq!(engine.runs(), 0);
    }
}

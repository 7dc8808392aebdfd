//! Credential environment probe.
//!
//! Used by the provider-identity check to report credentials for hosted AI
//! providers that should not exist on an air-gapped host. Findings are audit
//! warnings only.

/// Environment variables that hold credentials for hosted AI providers.
pub const EXTERNAL_PROVIDER_CREDENTIALS: &[&str] = &[
    "OPENAI_API_KEY",
    "ANTHROPIC_API_KEY",
    "AZURE_OPENAI_KEY",
    "AWS_ACCESS_KEY_ID",
    "GOOGLE_API_KEY",
];

/// Port for discovering external-provider credentials in the environment.
pub trait CredentialProbe: Send + Sync {
    /// Names of the credential variables that are present and non-empty.
    fn present_credentials(&self) -> Vec<String>;
}

/// A probe that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProbe for NoCredentials {
    fn present_credentials(&self) -> Vec<String> {
        Vec::new()
    }
}

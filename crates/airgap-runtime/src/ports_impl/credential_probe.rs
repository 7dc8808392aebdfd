//! CredentialProbe implementation backed by environment variables.

use std::fmt;

use airgap_core::ports::{CredentialProbe, EXTERNAL_PROVIDER_CREDENTIALS};

type VarSource = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reports which hosted-provider credential variables are set.
///
/// The variable source is injectable so tests never touch the real process
/// environment.
pub struct EnvCredentialProbe {
    source: VarSource,
}

impl EnvCredentialProbe {
    /// Probe the real process environment.
    pub fn from_process_env() -> Self {
        Self::with_source(|name| std::env::var(name).ok())
    }

    /// Probe a custom variable lookup.
    pub fn with_source<F>(source: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }
}

impl Default for EnvCredentialProbe {
    fn default() -> Self {
        Self::from_process_env()
    }
}

impl CredentialProbe for EnvCredentialProbe {
    fn present_credentials(&self) -> Vec<String> {
        EXTERNAL_PROVIDER_CREDENTIALS
            .iter()
            .copied()
            .filter(|&name| (self.source)(name).is_some_and(|value| !value.trim().is_empty()))
            .map(|name| {
                tracing::warn!(
                    target: "airgap.runtime",
                    variable = name,
                    "Found external provider credential in environment - ensure it is not used"
                );
                name.to_string()
            })
            .collect()
    }
}

impl fmt::Debug for EnvCredentialProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCredentialProbe").finish_non_exhaustive()
    }
}

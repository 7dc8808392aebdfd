//! Service configuration types and validation.
//!
//! Configuration is read once at construction and never mutated afterwards.
//! Every section uses `#[serde(default)]` so a partial JSON document only
//! overrides the fields it names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DomainPattern;

/// Deny patterns shipped with the default configuration.
pub const DEFAULT_DENY_PATTERNS: &[&str] = &[
    "api.openai.com",
    "api.anthropic.com",
    "*.openai.azure.com",
    "bedrock.*.amazonaws.com",
    "generativelanguage.googleapis.com",
    "api.cohere.ai",
    "api-inference.huggingface.co",
    "*.replicate.com",
];

/// Internal endpoints whitelisted by default.
pub const DEFAULT_ALLOW_LIST: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "model-server.internal",
    "gpu-cluster.internal",
    "redis.internal",
    "postgres.internal",
];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub security: SecurityConfig,
    pub policy: EgressPolicyConfig,
    pub model: ModelConfig,
}

impl ServiceConfig {
    /// Configuration with the shipped defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Parse a JSON document, falling back to defaults for missing fields,
    /// and validate the result.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Security posture flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Default-deny for anything not on the allow list. Must be on for the
    /// security gate to pass.
    pub air_gapped_mode: bool,
    pub encryption_at_rest: bool,
    pub encryption_in_transit: bool,
    pub encryption_algorithm: String,
    pub log_retention_days: u32,
    pub inference_history_days: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            air_gapped_mode: true,
            encryption_at_rest: true,
            encryption_in_transit: true,
            encryption_algorithm: "AES-256-GCM".to_string(),
            log_retention_days: 365,
            inference_history_days: 90,
        }
    }
}

/// Raw allow/deny lists, compiled into an [`crate::domain::EgressPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EgressPolicyConfig {
    /// Evaluated in order; first match wins.
    pub deny_patterns: Vec<String>,
    /// Exact hostnames.
    pub allow_list: Vec<String>,
}

impl Default for EgressPolicyConfig {
    fn default() -> Self {
        Self {
            deny_patterns: DEFAULT_DENY_PATTERNS.iter().map(ToString::to_string).collect(),
            allow_list: DEFAULT_ALLOW_LIST.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Local model description and default sampling parameters.
///
/// Sampling parameters are passed through to the inference engine as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_name: String,
    pub model_version: String,
    pub base_model: String,
    pub quantization: String,
    pub weights_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub max_context_length: u32,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    pub device: String,
    pub gpu_memory_fraction: f32,
    pub num_gpus: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: "Llama-2-Govt-v4".to_string(),
            model_version: "4.2.0".to_string(),
            base_model: "meta-llama/Llama-2-13b-hf".to_string(),
            quantization: "int8".to_string(),
            weights_path: PathBuf::from("/opt/models/llama-2-govt-v4/weights"),
            tokenizer_path: PathBuf::from("/opt/models/llama-2-govt-v4/tokenizer"),
            max_context_length: 4096,
            max_new_tokens: 1024,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.1,
            device: "cuda".to_string(),
            gpu_memory_fraction: 0.85,
            num_gpus: 4,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("top_p must be between 0.0 and 1.0, got {0}")]
    InvalidTopP(f32),

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("Repetition penalty must be positive, got {0}")]
    InvalidRepetitionPenalty(f32),

    #[error("max_new_tokens must be between 1 and max_context_length ({context}), got {value}")]
    InvalidMaxTokens { value: u32, context: u32 },

    #[error("GPU memory fraction must be in (0.0, 1.0], got {0}")]
    InvalidGpuMemoryFraction(f32),

    #[error("At least one GPU is required")]
    NoGpus,

    #[error("Retention period must be at least one day ({0})")]
    InvalidRetention(&'static str),

    #[error("Model name cannot be empty")]
    EmptyModelName,
}

/// Validate configuration values.
pub fn validate_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    for pattern in &config.policy.deny_patterns {
        DomainPattern::parse(pattern)?;
    }

    if config
        .policy
        .allow_list
        .iter()
        .any(|host| host.trim().is_empty())
    {
        return Err(ConfigError::InvalidPattern(
            "empty allow-list entry".to_string(),
        ));
    }

    let security = &config.security;
    if security.log_retention_days == 0 {
        return Err(ConfigError::InvalidRetention("log_retention_days"));
    }
    if security.inference_history_days == 0 {
        return Err(ConfigError::InvalidRetention("inference_history_days"));
    }

    validate_model(&config.model)
}

fn validate_model(model: &ModelConfig) -> Result<(), ConfigError> {
    if model.model_name.trim().is_empty() {
        return Err(ConfigError::EmptyModelName);
    }

    if !(0.0..=2.0).contains(&model.temperature) {
        return Err(ConfigError::InvalidTemperature(model.temperature));
    }

    if !(0.0..=1.0).contains(&model.top_p) {
        return Err(ConfigError::InvalidTopP(model.top_p));
    }

    if model.top_k == 0 {
        return Err(ConfigError::InvalidTopK);
    }

    if model.repetition_penalty <= 0.0 {
        return Err(ConfigError::InvalidRepetitionPenalty(
            model.repetition_penalty,
        ));
    }

    if model.max_new_tokens == 0 || model.max_new_tokens > model.max_context_length {
        return Err(ConfigError::InvalidMaxTokens {
            value: model.max_new_tokens,
            context: model.max_context_length,
        });
    }

    if !(model.gpu_memory_fraction > 0.0 && model.gpu_memory_fraction <= 1.0) {
        return Err(ConfigError::InvalidGpuMemoryFraction(
            model.gpu_memory_fraction,
        ));
    }

    if model.num_gpus == 0 {
        return Err(ConfigError::NoGpus);
    }

    Ok(())
}

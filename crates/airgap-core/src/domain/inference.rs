//! Inference request and result types.
//!
//! Every result carries the identity of the model that produced it and a
//! fixed security attestation block for downstream audit consumers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::ModelConfig;

/// Data-handling sensitivity label attached to a request.
///
/// Purely descriptive; nothing in the pipeline enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityLevel {
    Public,
    #[default]
    Internal,
    Confidential,
    Restricted,
    TopSecret,
}

impl SecurityLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Internal => "INTERNAL",
            Self::Confidential => "CONFIDENTIAL",
            Self::Restricted => "RESTRICTED",
            Self::TopSecret => "TOP_SECRET",
        }
    }
}

impl std::str::FromStr for SecurityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PUBLIC" => Ok(Self::Public),
            "INTERNAL" => Ok(Self::Internal),
            "CONFIDENTIAL" => Ok(Self::Confidential),
            "RESTRICTED" => Ok(Self::Restricted),
            "TOP_SECRET" => Ok(Self::TopSecret),
            other => Err(format!("unknown classification: {other}")),
        }
    }
}

/// Model provider.
///
/// Only on-premise inference exists. Hosted providers are blocked by the
/// egress policy and have no representation here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[default]
    #[serde(rename = "LOCAL_LLAMA")]
    Local,
}

impl Provider {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "LOCAL_LLAMA",
        }
    }
}

/// Identity of the loaded model, stamped on every result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentity {
    pub name: String,
    pub version: String,
    pub quantization: String,
    pub provider: Provider,
}

impl ModelIdentity {
    pub fn from_config(model: &ModelConfig) -> Self {
        Self {
            name: model.model_name.clone(),
            version: model.model_version.clone(),
            quantization: model.quantization.clone(),
            provider: Provider::Local,
        }
    }
}

/// Per-request overrides for the configured sampling defaults.
///
/// `None` means "use the configured default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceOverrides {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Fully resolved parameters handed to the inference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
}

impl InferenceRequest {
    /// Resolve a request: explicit overrides win, the model defaults fill
    /// the rest.
    pub fn resolve(prompt: &str, overrides: InferenceOverrides, model: &ModelConfig) -> Self {
        Self {
            prompt: prompt.to_string(),
            max_tokens: overrides.max_tokens.unwrap_or(model.max_new_tokens),
            temperature: overrides.temperature.unwrap_or(model.temperature),
            top_p: model.top_p,
            top_k: model.top_k,
            repetition_penalty: model.repetition_penalty,
        }
    }
}

/// Compliance frameworks every result is attested against.
pub const COMPLIANCE_TAGS: &[&str] = &["IT_ACT_2000", "CERT_IN", "DATA_LOCALIZATION"];

/// Data-locality marker for on-premise processing.
pub const DATA_LOCALITY_ON_PREMISE: &str = "ON_PREMISE";

/// Fixed attestation block attached to each result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityAttestation {
    pub air_gapped: bool,
    pub external_api_calls: u32,
    pub data_locality: String,
    pub compliance: Vec<String>,
}

impl SecurityAttestation {
    pub fn on_premise() -> Self {
        Self {
            air_gapped: true,
            external_api_calls: 0,
            data_locality: DATA_LOCALITY_ON_PREMISE.to_string(),
            compliance: COMPLIANCE_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Metadata stamped on every inference result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceMetadata {
    pub model: String,
    pub model_version: String,
    pub provider: Provider,
    pub quantization: String,
    pub inference_time_ms: f64,
    pub tokens_generated: u64,
    pub classification: SecurityLevel,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub security: SecurityAttestation,
}

/// Generated text plus audit metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub generated_text: String,
    pub metadata: InferenceMetadata,
}

/// Whitespace-delimited word count used for usage accounting.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Serialize a UTC timestamp as ISO-8601 with an explicit offset.
pub(crate) fn serialize_rfc3339<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
}

//! Inference engine port.
//!
//! This port isolates model loading and token generation from the service.
//! The service treats every call as synchronous from its own point of view:
//! it awaits the result while holding the pipeline lock and propagates any
//! failure unchanged.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ModelConfig;
use crate::domain::InferenceRequest;

/// Text produced by one engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceOutput {
    pub text: String,
    /// Token count as reported by the engine.
    pub tokens_generated: u64,
}

/// Errors that can occur inside the inference engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Model weights could not be loaded.
    #[error("Failed to load weights: {0}")]
    WeightsLoad(String),

    /// Tokenizer could not be loaded.
    #[error("Failed to load tokenizer: {0}")]
    TokenizerLoad(String),

    /// The warmup pass failed.
    #[error("Warmup failed: {0}")]
    Warmup(String),

    /// A generation call failed.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// The engine did not answer in time.
    #[error("Inference engine timed out after {0} ms")]
    Timeout(u64),
}

impl EngineError {
    /// Returns true if the failure happened while bringing the model up.
    #[must_use]
    pub const fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::WeightsLoad(_) | Self::TokenizerLoad(_) | Self::Warmup(_)
        )
    }

    /// Returns a suggested HTTP status code for this error.
    #[must_use]
    pub const fn suggested_status_code(&self) -> u16 {
        match self {
            Self::Timeout(_) => 504,
            Self::WeightsLoad(_) | Self::TokenizerLoad(_) | Self::Warmup(_) => 503,
            Self::Inference(_) => 500,
        }
    }
}

/// Port for the local model runtime.
///
/// Implementations:
/// - `SimulatedLocalEngine` in `airgap-runtime` (timed stand-in)
/// - `ScriptedEngine` in `test_utils` (no delay, deterministic)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Load quantized weights for the configured model.
    async fn load_weights(&self, model: &ModelConfig) -> Result<(), EngineError>;

    /// Load the tokenizer for the configured model.
    async fn load_tokenizer(&self, model: &ModelConfig) -> Result<(), EngineError>;

    /// Run one throwaway pass so the first real request is not cold.
    async fn warmup(&self) -> Result<(), EngineError>;

    /// Generate text for a fully resolved request.
    async fn run(&self, request: &InferenceRequest) -> Result<InferenceOutput, EngineError>;
}

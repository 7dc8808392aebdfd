//! InferenceEngine implementation that simulates an on-premise model.
//!
//! No weights are read and no GPU is touched. Each stage sleeps for a
//! configurable duration on the tokio timer so callers see realistic
//! latencies, and generation returns a fixed environmental analysis.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use airgap_core::ports::{EngineError, InferenceEngine, InferenceOutput};
use airgap_core::{InferenceRequest, ModelConfig};
use async_trait::async_trait;

/// Text returned by every simulated generation.
pub const SIMULATED_ANALYSIS: &str = "Based on the analysis of the provided data, the pollution \
    levels indicate moderate to severe air quality degradation. Primary sources appear to be \
    vehicular emissions and industrial activity. Recommended actions include increased \
    monitoring, public advisory issuance, and coordination with traffic authorities for \
    potential vehicle restrictions in affected zones.";

/// Per-stage latencies of the simulated engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedTimings {
    /// Weight loading, one entry per layer group.
    pub weight_stages: Vec<Duration>,
    pub tokenizer: Duration,
    pub warmup: Duration,
    pub inference: Duration,
}

impl Default for SimulatedTimings {
    fn default() -> Self {
        Self {
            weight_stages: vec![
                Duration::from_millis(500),
                Duration::from_millis(300),
                Duration::from_millis(300),
                Duration::from_millis(200),
            ],
            tokenizer: Duration::from_millis(100),
            warmup: Duration::from_millis(200),
            inference: Duration::from_millis(100),
        }
    }
}

impl SimulatedTimings {
    /// No delays at all.
    pub const fn instant() -> Self {
        Self {
            weight_stages: Vec::new(),
            tokenizer: Duration::ZERO,
            warmup: Duration::ZERO,
            inference: Duration::ZERO,
        }
    }

    /// Total time spent in `load_weights`, `load_tokenizer` and `warmup`.
    pub fn startup_total(&self) -> Duration {
        self.weight_stages.iter().sum::<Duration>() + self.tokenizer + self.warmup
    }
}

const WEIGHT_STAGE_LABELS: &[&str] = &[
    "attention layers",
    "feed-forward layers",
    "quantization",
    "GPU placement",
];

/// Simulated local model runtime.
#[derive(Debug, Default)]
pub struct SimulatedLocalEngine {
    timings: SimulatedTimings,
    weights_loaded: AtomicBool,
    tokenizer_loaded: AtomicBool,
}

impl SimulatedLocalEngine {
    pub fn new(timings: SimulatedTimings) -> Self {
        Self {
            timings,
            weights_loaded: AtomicBool::new(false),
            tokenizer_loaded: AtomicBool::new(false),
        }
    }

    fn is_loaded(&self) -> bool {
        self.weights_loaded.load(Ordering::Acquire) && self.tokenizer_loaded.load(Ordering::Acquire)
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl InferenceEngine for SimulatedLocalEngine {
    async fn load_weights(&self, model: &ModelConfig) -> Result<(), EngineError> {
        for (i, stage) in self.timings.weight_stages.iter().enumerate() {
            pause(*stage).await;
            let label = WEIGHT_STAGE_LABELS.get(i).copied().unwrap_or("weights");
            tracing::debug!(
                target: "airgap.runtime",
                stage = label,
                quantization = %model.quantization,
                "Weight stage loaded"
            );
        }
        self.weights_loaded.store(true, Ordering::Release);
        Ok(())
    }

    async fn load_tokenizer(&self, model: &ModelConfig) -> Result<(), EngineError> {
        pause(self.timings.tokenizer).await;
        tracing::debug!(
            target: "airgap.runtime",
            tokenizer = %model.tokenizer_path.display(),
            "Tokenizer loaded"
        );
        self.tokenizer_loaded.store(true, Ordering::Release);
        Ok(())
    }

    async fn warmup(&self) -> Result<(), EngineError> {
        if !self.is_loaded() {
            return Err(EngineError::Warmup("model not loaded".to_string()));
        }
        pause(self.timings.warmup).await;
        Ok(())
    }

    async fn run(&self, request: &InferenceRequest) -> Result<InferenceOutput, EngineError> {
        if !self.is_loaded() {
            return Err(EngineError::Inference("model not loaded".to_string()));
        }
        pause(self.timings.inference).await;

        // Honour the generation limit at word granularity.
        let limit = usize::try_from(request.max_tokens).unwrap_or(usize::MAX);
        let words: Vec<&str> = SIMULATED_ANALYSIS.split_whitespace().take(limit).collect();

        Ok(InferenceOutput {
            tokens_generated: words.len() as u64,
            text: words.join(" "),
        })
    }
}

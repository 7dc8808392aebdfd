//! Deterministic test doubles for the core ports.
//!
//! Available to this crate's unit tests and, behind the `test-utils`
//! feature, to adapter crates' tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::config::ModelConfig;
use crate::domain::InferenceRequest;
use crate::events::AuditEvent;
use crate::ports::{AuditSink, CredentialProbe, EngineError, InferenceEngine, InferenceOutput};

/// Canned response used by [`ScriptedEngine::new`].
pub const SCRIPTED_RESPONSE: &str = "Air quality is degraded; primary sources are vehicular \
                                     emissions and industrial activity.";

/// In-memory inference engine with no delays.
///
/// Returns the same text for every request and counts how it was driven.
/// `run` yields once to the scheduler so concurrent callers get a chance to
/// interleave if nothing serializes them.
#[derive(Debug)]
pub struct ScriptedEngine {
    response: String,
    load_failure: Option<EngineError>,
    tokenizer_failure: Option<EngineError>,
    run_failure: Option<EngineError>,
    weight_loads: AtomicU64,
    tokenizer_loads: AtomicU64,
    warmups: AtomicU64,
    runs: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    last_request: Mutex<Option<InferenceRequest>>,
}

impl ScriptedEngine {
    /// An engine answering with [`SCRIPTED_RESPONSE`].
    pub fn new() -> Self {
        Self::with_response(SCRIPTED_RESPONSE)
    }

    /// An engine answering with the given text.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            load_failure: None,
            tokenizer_failure: None,
            run_failure: None,
            weight_loads: AtomicU64::new(0),
            tokenizer_loads: AtomicU64::new(0),
            warmups: AtomicU64::new(0),
            runs: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Make `load_weights` fail with the given error.
    #[must_use]
    pub fn failing_load(mut self, error: EngineError) -> Self {
        self.load_failure = Some(error);
        self
    }

    /// Make `load_tokenizer` fail with the given error.
    #[must_use]
    pub fn failing_tokenizer(mut self, error: EngineError) -> Self {
        self.tokenizer_failure = Some(error);
        self
    }

    /// Make `run` fail with the given error.
    #[must_use]
    pub fn failing_run(mut self, error: EngineError) -> Self {
        self.run_failure = Some(error);
        self
    }

    pub fn weight_loads(&self) -> u64 {
        self.weight_loads.load(Ordering::SeqCst)
    }

    pub fn tokenizer_loads(&self) -> u64 {
        self.tokenizer_loads.load(Ordering::SeqCst)
    }

    pub fn warmups(&self) -> u64 {
        self.warmups.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::SeqCst)
    }

    /// Highest number of `run` calls observed executing at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<InferenceRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceEngine for ScriptedEngine {
    async fn load_weights(&self, _model: &ModelConfig) -> Result<(), EngineError> {
        self.weight_loads.fetch_add(1, Ordering::SeqCst);
        match &self.load_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn load_tokenizer(&self, _model: &ModelConfig) -> Result<(), EngineError> {
        self.tokenizer_loads.fetch_add(1, Ordering::SeqCst);
        match &self.tokenizer_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn warmup(&self) -> Result<(), EngineError> {
        self.warmups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn run(&self, request: &InferenceRequest) -> Result<InferenceOutput, EngineError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        *self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request.clone());

        if let Some(err) = &self.run_failure {
            return Err(err.clone());
        }

        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(InferenceOutput {
            text: self.response.clone(),
            tokens_generated: self.response.split_whitespace().count() as u64,
        })
    }
}

/// Audit sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events of the given kind (see [`AuditEvent::kind`]).
    pub fn count_of(&self, kind: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Credential probe reporting a fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Vec<String>);

impl StaticCredentials {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl CredentialProbe for StaticCredentials {
    fn present_credentials(&self) -> Vec<String> {
        self.0.clone()
    }
}

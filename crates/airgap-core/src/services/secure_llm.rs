//! Secure local LLM service - lifecycle and inference pipeline.
//!
//! # Locking
//!
//! `initialize`, `generate` and `analyze_pollution_report` each hold the
//! pipeline lock for their whole body, so at most one initialization or
//! inference runs at a time per service. Readiness and the usage counters
//! are only written under that lock but can be read without it, so
//! `statistics` and `health_check` never wait behind a running inference.
//!
//! The violation counter lives in [`EndpointPolicyEngine`] and does not
//! touch the pipeline lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::{ServiceConfig, validate_config};
use crate::domain::{
    AnalysisResult, EgressPolicy, HealthState, HealthStatus, InferenceMetadata,
    InferenceOverrides, InferenceRequest, InferenceResult, ModelIdentity, PollutionReport,
    SecurityAttestation, SecurityLevel, SecurityReport, ServiceState, Severity,
    StatisticsSnapshot, ValidationResult, build_analysis_prompt, word_count,
};
use crate::events::AuditEvent;
use crate::ports::{ANALYSIS_CONFIDENCE, EngineError, ServiceDeps, ServiceError};

use super::{EndpointPolicyEngine, SecurityGate};

/// Generation limit for pollution analyses.
pub const ANALYSIS_MAX_TOKENS: u32 = 512;

/// Low temperature for analytical output.
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// The egress-gated inference service.
pub struct SecureLlmService {
    config: ServiceConfig,
    identity: ModelIdentity,
    policy: Arc<EndpointPolicyEngine>,
    gate: SecurityGate,
    deps: ServiceDeps,
    /// Serializes initialization and inference.
    pipeline: Mutex<()>,
    /// Set exactly once, on the transition to `Ready`.
    initialization_time: OnceLock<Duration>,
    inference_count: AtomicU64,
    total_tokens_processed: AtomicU64,
}

impl SecureLlmService {
    /// Build a service from validated configuration and its collaborators.
    pub fn new(config: ServiceConfig, deps: ServiceDeps) -> Result<Self, ServiceError> {
        validate_config(&config)?;

        let policy = Arc::new(EndpointPolicyEngine::new(
            EgressPolicy::from_config(&config.policy)?,
            config.security.air_gapped_mode,
            Arc::clone(&deps.audit),
        ));

        let gate = SecurityGate::new(
            config.security.clone(),
            Arc::clone(&policy),
            Arc::clone(&deps.credentials),
            Arc::clone(&deps.audit),
        );

        let identity = ModelIdentity::from_config(&config.model);
        tracing::info!(
            target: "airgap.service",
            model = %identity.name,
            "SecureLlmService instance created"
        );

        Ok(Self {
            config,
            identity,
            policy,
            gate,
            deps,
            pipeline: Mutex::new(()),
            initialization_time: OnceLock::new(),
            inference_count: AtomicU64::new(0),
            total_tokens_processed: AtomicU64::new(0),
        })
    }

    /// Initialize the service, reporting only whether it is ready.
    ///
    /// See [`Self::try_initialize`] for the failure cause.
    pub async fn initialize(&self) -> bool {
        self.try_initialize().await.is_ok()
    }

    /// Run the security gate and bring the model up.
    ///
    /// Idempotent: once `Ready`, further calls return `Ok(())` without
    /// touching the gate or the engine. A failure anywhere leaves the service
    /// `Uninitialized`; nothing is retried.
    pub async fn try_initialize(&self) -> Result<(), ServiceError> {
        let _pipeline = self.pipeline.lock().await;

        if self.is_initialized() {
            tracing::warn!(target: "airgap.service", "Model already initialized");
            return Ok(());
        }

        let started = Instant::now();

        tracing::info!(target: "airgap.service", "Running security pre-checks");
        let report = self.gate.run();
        if let Some(failed) = report.failed_check() {
            let err = ServiceError::SecurityGate {
                check: failed.check,
                reason: failed.outcome.detail().to_string(),
            };
            tracing::error!(target: "airgap.service", error = %err, "Security check failed - aborting initialization");
            self.deps.audit.record(AuditEvent::InitializationFailed {
                reason: err.to_string(),
            });
            return Err(err);
        }

        if let Err(err) = self.load_model().await {
            tracing::error!(target: "airgap.service", error = %err, "Model loading failed");
            self.deps.audit.record(AuditEvent::InitializationFailed {
                reason: err.to_string(),
            });
            return Err(err.into());
        }

        let elapsed = *self.initialization_time.get_or_init(|| started.elapsed());

        tracing::info!(
            target: "airgap.service",
            seconds = elapsed.as_secs_f64(),
            quantization = %self.config.model.quantization,
            gpus = self.config.model.num_gpus,
            "Model initialized successfully"
        );
        self.deps.audit.record(AuditEvent::ServiceInitialized {
            model_name: self.identity.name.clone(),
            initialization_time_ms: round_ms(elapsed),
        });

        Ok(())
    }

    async fn load_model(&self) -> Result<(), EngineError> {
        let model = &self.config.model;

        tracing::info!(
            target: "airgap.service",
            model = %model.model_name,
            quantization = %model.quantization,
            weights = %model.weights_path.display(),
            "Loading quantized weights"
        );
        self.deps.engine.load_weights(model).await?;

        tracing::info!(target: "airgap.service", tokenizer = %model.tokenizer_path.display(), "Initializing tokenizer");
        self.deps.engine.load_tokenizer(model).await?;

        tracing::info!(target: "airgap.service", "Running warmup inference");
        self.deps.engine.warmup().await
    }

    /// Generate text with the local model.
    ///
    /// `overrides` take precedence over the configured sampling defaults.
    pub async fn generate(
        &self,
        prompt: &str,
        overrides: InferenceOverrides,
        classification: SecurityLevel,
    ) -> Result<InferenceResult, ServiceError> {
        let _pipeline = self.pipeline.lock().await;
        self.generate_locked(prompt, overrides, classification).await
    }

    /// Analyze a pollution report.
    ///
    /// Prompt construction and generation happen under one pipeline lock
    /// acquisition.
    pub async fn analyze_pollution_report(
        &self,
        report: &PollutionReport,
    ) -> Result<AnalysisResult, ServiceError> {
        let _pipeline = self.pipeline.lock().await;

        let prompt = build_analysis_prompt(report);
        let result = self
            .generate_locked(
                &prompt,
                InferenceOverrides {
                    max_tokens: Some(ANALYSIS_MAX_TOKENS),
                    temperature: Some(ANALYSIS_TEMPERATURE),
                },
                SecurityLevel::Confidential,
            )
            .await?;

        Ok(AnalysisResult {
            report_id: report.report_id.clone(),
            recommendations: self.deps.recommendations.extract(&result.generated_text),
            ai_analysis: result.generated_text,
            confidence_score: ANALYSIS_CONFIDENCE,
            severity_assessment: Severity::from_aqi(report.aqi),
            metadata: result.metadata,
        })
    }

    /// Body of `generate`; the caller must hold the pipeline lock.
    async fn generate_locked(
        &self,
        prompt: &str,
        overrides: InferenceOverrides,
        classification: SecurityLevel,
    ) -> Result<InferenceResult, ServiceError> {
        if !self.is_initialized() {
            return Err(ServiceError::NotInitialized);
        }

        let request = InferenceRequest::resolve(prompt, overrides, &self.config.model);

        let started = Instant::now();
        self.deps.audit.record(AuditEvent::InferenceStarted {
            classification,
            prompt_length: prompt.len(),
        });

        let output = self.deps.engine.run(&request).await?;
        let elapsed = started.elapsed();

        self.inference_count.fetch_add(1, Ordering::Relaxed);
        self.total_tokens_processed.fetch_add(
            word_count(prompt) + word_count(&output.text),
            Ordering::Relaxed,
        );

        let inference_time_ms = round_ms(elapsed);
        self.deps.audit.record(AuditEvent::InferenceCompleted {
            classification,
            prompt_length: prompt.len(),
            tokens_generated: output.tokens_generated,
            inference_time_ms,
        });

        Ok(InferenceResult {
            generated_text: output.text,
            metadata: InferenceMetadata {
                model: self.identity.name.clone(),
                model_version: self.identity.version.clone(),
                provider: self.identity.provider,
                quantization: self.identity.quantization.clone(),
                inference_time_ms,
                tokens_generated: output.tokens_generated,
                classification,
                timestamp: self.deps.clock.now(),
                security: SecurityAttestation::on_premise(),
            },
        })
    }

    /// Validate an outbound hostname against the egress policy.
    pub fn validate_endpoint(&self, hostname: &str) -> ValidationResult {
        self.policy.validate_endpoint(hostname)
    }

    /// Run the full security gate now.
    pub fn security_report(&self) -> SecurityReport {
        self.gate.run()
    }

    /// Run the full security gate now and return the verdict.
    pub fn check_security(&self) -> bool {
        self.gate.check_security()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialization_time.get().is_some()
    }

    pub fn state(&self) -> ServiceState {
        if self.is_initialized() {
            ServiceState::Ready
        } else {
            ServiceState::Uninitialized
        }
    }

    /// Usage and deployment statistics.
    pub fn statistics(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            is_initialized: self.is_initialized(),
            model_name: self.identity.name.clone(),
            inference_count: self.inference_count.load(Ordering::Relaxed),
            total_tokens_processed: self.total_tokens_processed.load(Ordering::Relaxed),
            initialization_time_seconds: self
                .initialization_time
                .get()
                .map(Duration::as_secs_f64),
            security_violations: self.policy.violation_count(),
            air_gapped_mode: self.config.security.air_gapped_mode,
            gpu_count: self.config.model.num_gpus,
            quantization: self.config.model.quantization.clone(),
        }
    }

    /// Health probe.
    ///
    /// Re-runs the whole security gate on every call, which also validates
    /// the probe endpoints and so adds to the violation count.
    pub fn health_check(&self) -> HealthStatus {
        let model_loaded = self.is_initialized();
        HealthStatus {
            status: if model_loaded {
                HealthState::Healthy
            } else {
                HealthState::Initializing
            },
            timestamp: self.deps.clock.now(),
            model_loaded,
            security_check_passed: self.check_security(),
            inference_count: self.inference_count.load(Ordering::Relaxed),
        }
    }
}

fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Provider, SecurityCheck};
    use crate::ports::{FixedClock, MockInferenceEngine, StaticRecommendations};
    use crate::test_utils::{RecordingAuditSink, SCRIPTED_RESPONSE, ScriptedEngine};
    use chrono::{TimeZone, Utc};

    struct Harness {
        service: Arc<SecureLlmService>,
        engine: Arc<ScriptedEngine>,
        audit: Arc<RecordingAuditSink>,
    }

    fn harness_with(config: ServiceConfig, engine: ScriptedEngine) -> Harness {
        let engine = Arc::new(engine);
        let audit = Arc::new(RecordingAuditSink::new());
        let deps = ServiceDeps::new(engine.clone())
            .with_clock(Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap(),
            )))
            .with_audit(audit.clone());
        let service = Arc::new(SecureLlmService::new(config, deps).unwrap());
        Harness {
            service,
            engine,
            audit,
        }
    }

    fn harness() -> Harness {
        harness_with(ServiceConfig::with_defaults(), ScriptedEngine::new())
    }

    #[tokio::test]
    async fn test_initialize_transitions_to_ready() {
        let h = harness();
        assert_eq!(h.service.state(), ServiceState::Uninitialized);

        assert!(h.service.initialize().await);

        assert_eq!(h.service.state(), ServiceState::Ready);
        assert_eq!(h.engine.weight_loads(), 1);
        assert_eq!(h.engine.tokenizer_loads(), 1);
        assert_eq!(h.engine.warmups(), 1);
        assert!(h.service.statistics().initialization_time_seconds.is_some());
        assert_eq!(h.audit.count_of("service_initialized"), 1);
    }

    #[tokio::test]
    async fn test_second_initialize_is_noop() {
        let h = harness();
        assert!(h.service.initialize().await);
        let first = h.service.statistics().initialization_time_seconds;
        let violations = h.service.statistics().security_violations;

        assert!(h.service.initialize().await);

        assert_eq!(h.service.statistics().initialization_time_seconds, first);
        assert_eq!(h.engine.weight_loads(), 1);
        assert_eq!(h.engine.warmups(), 1);
        // The gate did not run again either.
        assert_eq!(h.service.statistics().security_violations, violations);
        assert_eq!(h.audit.count_of("security_gate_completed"), 1);
    }

    #[tokio::test]
    async fn test_concurrent_initialize_loads_once() {
        let h = harness();
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&h.service);
                tokio::spawn(async move { service.initialize().await })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap());
        }
        assert_eq!(h.engine.weight_loads(), 1);
        assert_eq!(h.audit.count_of("service_initialized"), 1);
    }

    #[tokio::test]
    async fn test_gate_failure_keeps_service_uninitialized() {
        let mut config = ServiceConfig::with_defaults();
        config.security.air_gapped_mode = false;
        let h = harness_with(config, ScriptedEngine::new());

        let err = h.service.try_initialize().await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::SecurityGate {
                check: SecurityCheck::AirGappedMode,
                ..
            }
        ));
        assert!(err.is_not_ready());
        assert!(!h.service.initialize().await);
        assert_eq!(h.service.state(), ServiceState::Uninitialized);
        assert_eq!(h.engine.weight_loads(), 0);
        assert_eq!(h.audit.count_of("initialization_failed"), 2);
    }

    #[tokio::test]
    async fn test_load_failure_is_not_ready() {
        let h = harness_with(
            ServiceConfig::with_defaults(),
            ScriptedEngine::new().failing_load(EngineError::WeightsLoad("checksum".into())),
        );

        let err = h.service.try_initialize().await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Engine(EngineError::WeightsLoad(_))
        ));
        assert!(!h.service.is_initialized());
        assert_eq!(h.engine.tokenizer_loads(), 0);
        assert!(h.service.statistics().initialization_time_seconds.is_none());
    }

    #[tokio::test]
    async fn test_tokenizer_failure_skips_warmup() {
        let h = harness_with(
            ServiceConfig::with_defaults(),
            ScriptedEngine::new()
                .failing_tokenizer(EngineError::TokenizerLoad("vocab missing".into())),
        );

        let err = h.service.try_initialize().await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Engine(EngineError::TokenizerLoad(_))
        ));
        assert_eq!(h.service.state(), ServiceState::Uninitialized);
        assert_eq!(h.engine.weight_loads(), 1);
        assert_eq!(h.engine.tokenizer_loads(), 1);
        assert_eq!(h.engine.warmups(), 0);
        assert_eq!(h.audit.count_of("initialization_failed"), 1);
        assert!(matches!(
            h.service
                .generate("hi", InferenceOverrides::default(), SecurityLevel::Internal)
                .await,
            Err(ServiceError::NotInitialized)
        ));
        assert_eq!(h.engine.runs(), 0);
    }

    #[tokio::test]
    async fn test_warmup_failure_is_not_ready() {
        let mut engine = MockInferenceEngine::new();
        engine.expect_load_weights().times(1).returning(|_| Ok(()));
        engine.expect_load_tokenizer().times(1).returning(|_| Ok(()));
        engine
            .expect_warmup()
            .times(1)
            .returning(|| Err(EngineError::Warmup("CUDA OOM".into())));
        engine.expect_run().never();

        let service =
            SecureLlmService::new(ServiceConfig::with_defaults(), ServiceDeps::new(Arc::new(engine)))
                .unwrap();

        assert!(!service.initialize().await);
        assert_eq!(service.state(), ServiceState::Uninitialized);
        assert!(matches!(
            service
                .generate("hi", InferenceOverrides::default(), SecurityLevel::Internal)
                .await,
            Err(ServiceError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_generate_before_initialize_fails() {
        let h = harness();
        let err = h
            .service
            .generate("hello", InferenceOverrides::default(), SecurityLevel::Internal)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotInitialized));
        assert_eq!(h.engine.runs(), 0);
        assert_eq!(h.service.statistics().inference_count, 0);
    }

    #[tokio::test]
    async fn test_generate_stamps_metadata() {
        let h = harness();
        h.service.initialize().await;

        let result = h
            .service
            .generate(
                "Summarize today's readings",
                InferenceOverrides::default(),
                SecurityLevel::Restricted,
            )
            .await
            .unwrap();

        assert_eq!(result.generated_text, SCRIPTED_RESPONSE);
        let meta = &result.metadata;
        assert_eq!(meta.model, "Llama-2-Govt-v4");
        assert_eq!(meta.model_version, "4.2.0");
        assert_eq!(meta.provider, Provider::Local);
        assert_eq!(meta.quantization, "int8");
        assert_eq!(meta.classification, SecurityLevel::Restricted);
        assert_eq!(meta.tokens_generated, word_count(SCRIPTED_RESPONSE));
        assert_eq!(
            meta.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap()
        );
        assert_eq!(meta.security, SecurityAttestation::on_premise());
        assert!(meta.inference_time_ms >= 0.0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["metadata"]["provider"], "LOCAL_LLAMA");
        assert_eq!(json["metadata"]["timestamp"], "2024-01-15T08:30:00.000000+00:00");
        assert_eq!(json["metadata"]["security"]["data_locality"], "ON_PREMISE");
    }

    #[tokio::test]
    async fn test_explicit_parameters_override_defaults() {
        let h = harness();
        h.service.initialize().await;

        h.service
            .generate(
                "hi",
                InferenceOverrides {
                    max_tokens: Some(64),
                    temperature: None,
                },
                SecurityLevel::Internal,
            )
            .await
            .unwrap();

        let request = h.engine.last_request().unwrap();
        assert_eq!(request.max_tokens, 64);
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.top_k, 50);
    }

    #[tokio::test]
    async fn test_overrides_reach_engine_unchanged() {
        let h = harness();
        h.service.initialize().await;

        for overrides in [
            InferenceOverrides {
                max_tokens: Some(8192),
                temperature: None,
            },
            InferenceOverrides {
                max_tokens: None,
                temperature: Some(2.5),
            },
            InferenceOverrides {
                max_tokens: Some(0),
                temperature: Some(-1.0),
            },
        ] {
            h.service
                .generate("hi", overrides, SecurityLevel::Internal)
                .await
                .unwrap();

            let model = &h.service.config.model;
            let request = h.engine.last_request().unwrap();
            assert_eq!(
                request.max_tokens,
                overrides.max_tokens.unwrap_or(model.max_new_tokens)
            );
            let temperature = overrides.temperature.unwrap_or(model.temperature);
            assert!((request.temperature - temperature).abs() < f32::EPSILON);
        }
        assert_eq!(h.engine.runs(), 3);
        assert_eq!(h.service.statistics().inference_count, 3);
    }

    #[tokio::test]
    async fn test_counters_sum_word_counts() {
        let h = harness();
        h.service.initialize().await;

        let prompts = ["one", "one two", "one two three", ""];
        for prompt in prompts {
            h.service
                .generate(prompt, InferenceOverrides::default(), SecurityLevel::Internal)
                .await
                .unwrap();
        }

        let stats = h.service.statistics();
        assert_eq!(stats.inference_count, prompts.len() as u64);
        let expected: u64 = prompts
            .iter()
            .map(|p| word_count(p) + word_count(SCRIPTED_RESPONSE))
            .sum();
        assert_eq!(stats.total_tokens_processed, expected);
    }

    #[tokio::test]
    async fn test_engine_failure_propagates_without_counting() {
        let h = harness_with(
            ServiceConfig::with_defaults(),
            ScriptedEngine::new().failing_run(EngineError::Timeout(30_000)),
        );
        h.service.initialize().await;

        let err = h
            .service
            .generate("hi", InferenceOverrides::default(), SecurityLevel::Internal)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Engine(EngineError::Timeout(30_000))));

        let stats = h.service.statistics();
        assert_eq!(stats.inference_count, 0);
        assert_eq!(stats.total_tokens_processed, 0);
        assert!(stats.is_initialized);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_generate_never_loses_updates() {
        const CALLERS: usize = 64;
        const CALLS_PER_CALLER: usize = 5;

        let h = harness();
        assert!(h.service.initialize().await);

        let tasks: Vec<_> = (0..CALLERS)
            .map(|i| {
                let service = Arc::clone(&h.service);
                tokio::spawn(async move {
                    let prompt = vec!["word"; i % 7 + 1].join(" ");
                    for _ in 0..CALLS_PER_CALLER {
                        service
                            .generate(&prompt, InferenceOverrides::default(), SecurityLevel::Internal)
                            .await
                            .unwrap();
                    }
                    (i % 7 + 1) as u64
                })
            })
            .collect();

        let mut expected_tokens = 0;
        for task in tasks {
            let prompt_words = task.await.unwrap();
            expected_tokens +=
                CALLS_PER_CALLER as u64 * (prompt_words + word_count(SCRIPTED_RESPONSE));
        }

        let stats = h.service.statistics();
        assert_eq!(stats.inference_count, (CALLERS * CALLS_PER_CALLER) as u64);
        assert_eq!(stats.total_tokens_processed, expected_tokens);
        assert_eq!(h.engine.runs(), (CALLERS * CALLS_PER_CALLER) as u64);
        assert_eq!(h.engine.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_analyze_pollution_report() {
        let h = harness();
        h.service.initialize().await;

        let report = PollutionReport {
            report_id: Some("RPT-2024-001234".to_string()),
            location: Some("Connaught Place, New Delhi".to_string()),
            pm25: Some(245.0),
            pm10: Some(389.0),
            aqi: Some(312.0),
            description: Some("Heavy smog observed, visibility reduced to 200m".to_string()),
            timestamp: None,
        };

        let analysis = h.service.analyze_pollution_report(&report).await.unwrap();
        assert_eq!(analysis.report_id.as_deref(), Some("RPT-2024-001234"));
        assert_eq!(analysis.severity_assessment, Severity::VeryPoor);
        assert_eq!(analysis.ai_analysis, SCRIPTED_RESPONSE);
        assert!((analysis.confidence_score - 0.94).abs() < f64::EPSILON);
        assert_eq!(
            analysis.recommendations.len(),
            StaticRecommendations::ITEMS.len()
        );
        assert_eq!(analysis.metadata.classification, SecurityLevel::Confidential);

        let request = h.engine.last_request().unwrap();
        assert_eq!(request.max_tokens, ANALYSIS_MAX_TOKENS);
        assert!((request.temperature - ANALYSIS_TEMPERATURE).abs() < f32::EPSILON);
        assert!(request.prompt.contains("Connaught Place"));
        assert!(request.prompt.contains("- Time: Unknown"));

        assert_eq!(h.service.statistics().inference_count, 1);
    }

    #[tokio::test]
    async fn test_analyze_severity_bands() {
        let h = harness();
        h.service.initialize().await;

        for (aqi, expected) in [
            (450.0, Severity::Severe),
            (312.0, Severity::VeryPoor),
            (50.0, Severity::Satisfactory),
        ] {
            let report = PollutionReport {
                aqi: Some(aqi),
                ..Default::default()
            };
            let analysis = h.service.analyze_pollution_report(&report).await.unwrap();
            assert_eq!(analysis.severity_assessment, expected, "aqi={aqi}");
        }
    }

    #[tokio::test]
    async fn test_analyze_before_initialize_fails() {
        let h = harness();
        let err = h
            .service
            .analyze_pollution_report(&PollutionReport::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotInitialized));
    }

    #[tokio::test]
    async fn test_health_check_reruns_gate() {
        let h = harness();

        let health = h.service.health_check();
        assert_eq!(health.status, HealthState::Initializing);
        assert!(!health.model_loaded);
        assert!(health.security_check_passed);

        h.service.initialize().await;
        let before = h.service.statistics().security_violations;
        let health = h.service.health_check();
        assert_eq!(health.status, HealthState::Healthy);
        assert!(health.model_loaded);
        assert_eq!(
            h.service.statistics().security_violations,
            before + crate::services::EXTERNAL_API_PROBES.len() as u64
        );
    }

    #[tokio::test]
    async fn test_statistics_snapshot() {
        let h = harness();
        let stats = h.service.statistics();
        assert!(!stats.is_initialized);
        assert_eq!(stats.model_name, "Llama-2-Govt-v4");
        assert_eq!(stats.gpu_count, 4);
        assert_eq!(stats.quantization, "int8");
        assert!(stats.air_gapped_mode);
        assert_eq!(stats.security_violations, 0);

        h.service.validate_endpoint("api.openai.com");
        assert_eq!(h.service.statistics().security_violations, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ServiceConfig::with_defaults();
        config.model.top_p = 1.5;
        let result = SecureLlmService::new(
            config,
            ServiceDeps::new(Arc::new(ScriptedEngine::new())),
        );
        assert!(matches!(result, Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_round_ms() {
        assert!((round_ms(Duration::from_micros(1_234_567)) - 1234.57).abs() < 1e-9);
    }
}

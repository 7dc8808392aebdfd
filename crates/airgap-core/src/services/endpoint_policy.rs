//! Endpoint policy engine - allow/deny matching with violation accounting.
//!
//! # Evaluation Order
//!
//! 1. Deny patterns, in configured order (first match wins)
//! 2. Exact allow-list membership
//! 3. Air-gapped default deny
//! 4. Default allow
//!
//! Deny always beats allow. Every denial bumps the violation counter exactly
//! once; allowed calls never touch it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{EgressPolicy, ValidationReason, ValidationResult, normalize_hostname};
use crate::events::AuditEvent;
use crate::ports::AuditSink;

/// Validates outbound hostnames against the egress policy.
pub struct EndpointPolicyEngine {
    policy: EgressPolicy,
    air_gapped: bool,
    /// Never reset. Independent of the service pipeline lock.
    violations: AtomicU64,
    audit: Arc<dyn AuditSink>,
}

impl EndpointPolicyEngine {
    /// Create an engine over a compiled policy.
    pub fn new(policy: EgressPolicy, air_gapped: bool, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            policy,
            air_gapped,
            violations: AtomicU64::new(0),
            audit,
        }
    }

    /// Validate whether a hostname may be contacted.
    pub fn validate_endpoint(&self, hostname: &str) -> ValidationResult {
        let host = normalize_hostname(hostname);
        let reason = self.evaluate(&host);

        match &reason {
            ValidationReason::Denied(rule) => self.record_violation(&host, rule),
            ValidationReason::NotWhitelistedAirGapped => {
                self.record_violation(&host, &reason.to_string());
            }
            ValidationReason::Whitelisted | ValidationReason::DefaultAllow => {
                tracing::debug!(target: "airgap.policy", hostname = %host, %reason, "Endpoint allowed");
            }
        }

        ValidationResult::from_reason(&reason)
    }

    /// Current violation count.
    pub fn violation_count(&self) -> u64 {
        self.violations.load(Ordering::Acquire)
    }

    fn evaluate(&self, host: &str) -> ValidationReason {
        if let Some(pattern) = self.policy.first_deny_match(host) {
            return ValidationReason::Denied(pattern.to_string());
        }

        if self.policy.is_whitelisted(host) {
            return ValidationReason::Whitelisted;
        }

        if self.air_gapped {
            ValidationReason::NotWhitelistedAirGapped
        } else {
            ValidationReason::DefaultAllow
        }
    }

    fn record_violation(&self, host: &str, rule: &str) {
        let total = self.violations.fetch_add(1, Ordering::AcqRel) + 1;
        self.audit.record(AuditEvent::violation(host, rule, total));
    }
}

impl std::fmt::Debug for EndpointPolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointPolicyEngine")
            .field("policy", &self.policy)
            .field("air_gapped", &self.air_gapped)
            .field("violations", &self.violation_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EgressPolicyConfig;
    use crate::domain::DomainPattern;
    use crate::ports::NoopAuditSink;
    use crate::test_utils::RecordingAuditSink;

    fn engine(air_gapped: bool) -> EndpointPolicyEngine {
        let policy = EgressPolicy::from_config(&EgressPolicyConfig::default()).unwrap();
        EndpointPolicyEngine::new(policy, air_gapped, Arc::new(NoopAuditSink::new()))
    }

    fn engine_with(deny: &[&str], allow: &[&str], air_gapped: bool) -> EndpointPolicyEngine {
        let policy = EgressPolicy::new(
            deny.iter().map(|p| DomainPattern::parse(p).unwrap()).collect(),
            allow.iter().map(ToString::to_string),
        );
        EndpointPolicyEngine::new(policy, air_gapped, Arc::new(NoopAuditSink::new()))
    }

    #[test]
    fn test_verbatim_deny_entries_are_denied_once_each() {
        let engine = engine(true);
        for (i, host) in [
            "api.openai.com",
            "api.anthropic.com",
            "generativelanguage.googleapis.com",
            "api.cohere.ai",
            "api-inference.huggingface.co",
        ]
        .into_iter()
        .enumerate()
        {
            let before = engine.violation_count();
            let result = engine.validate_endpoint(host);
            assert!(!result.allowed, "{host} should be denied");
            assert_eq!(result.reason, host);
            assert_eq!(engine.violation_count(), before + 1);
            assert_eq!(engine.violation_count(), i as u64 + 1);
        }
    }

    #[test]
    fn test_wildcard_denies_subdomain_and_bare_domain() {
        let engine = engine_with(&["*.example.com"], &[], false);

        let sub = engine.validate_endpoint("a.example.com");
        assert!(!sub.allowed);
        assert_eq!(sub.reason, "*.example.com");

        assert!(!engine.validate_endpoint("example.com").allowed);

        let other = engine.validate_endpoint("notexample.com");
        assert!(other.allowed);
        assert_eq!(other.reason, "default allow");

        assert_eq!(engine.violation_count(), 2);
    }

    #[test]
    fn test_whitelisted_hosts_do_not_count() {
        let engine = engine(true);
        for host in ["localhost", "127.0.0.1", "redis.internal", "postgres.internal"] {
            let result = engine.validate_endpoint(host);
            assert!(result.allowed);
            assert_eq!(result.reason, "whitelisted");
        }
        assert_eq!(engine.violation_count(), 0);
    }

    #[test]
    fn test_deny_beats_allow() {
        let engine = engine_with(&["*.internal"], &["redis.internal"], true);
        let result = engine.validate_endpoint("redis.internal");
        assert!(!result.allowed);
        assert_eq!(result.reason, "*.internal");
        assert_eq!(engine.violation_count(), 1);
    }

    #[test]
    fn test_unknown_host_depends_on_air_gapped_mode() {
        let strict = engine(true);
        let result = strict.validate_endpoint("example.org");
        assert!(!result.allowed);
        assert_eq!(result.reason, "not whitelisted under air-gapped policy");
        assert_eq!(strict.violation_count(), 1);

        let open = engine(false);
        let result = open.validate_endpoint("example.org");
        assert!(result.allowed);
        assert_eq!(result.reason, "default allow");
        assert_eq!(open.violation_count(), 0);
    }

    #[test]
    fn test_hostnames_are_case_insensitive() {
        let engine = engine(true);
        assert!(!engine.validate_endpoint("API.OpenAI.COM").allowed);
        assert!(engine.validate_endpoint("LocalHost").allowed);
    }

    #[test]
    fn test_violations_are_audited() {
        let sink = Arc::new(RecordingAuditSink::new());
        let policy = EgressPolicy::from_config(&EgressPolicyConfig::default()).unwrap();
        let engine = EndpointPolicyEngine::new(policy, true, sink.clone());

        engine.validate_endpoint("localhost");
        engine.validate_endpoint("foo.openai.azure.com");
        engine.validate_endpoint("example.org");

        let events = sink.events();
        assert_eq!(
            events,
            vec![
                AuditEvent::violation("foo.openai.azure.com", "*.openai.azure.com", 1),
                AuditEvent::violation(
                    "example.org",
                    "not whitelisted under air-gapped policy",
                    2
                ),
            ]
        );
    }

    #[test]
    fn test_concurrent_denials_are_counted_exactly() {
        let engine = Arc::new(engine(true));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        engine.validate_endpoint("api.openai.com");
                        engine.validate_endpoint("localhost");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.violation_count(), 8 * 250);
    }
}

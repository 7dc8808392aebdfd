//! Security gate - the checks that must pass before inference is allowed.
//!
//! Checks run in a fixed order:
//!
//! 1. Air-gapped mode (critical)
//! 2. External AI endpoints unreachable (critical)
//! 3. Encryption at rest and in transit (warning only)
//! 4. Provider identity (critical, but only one provider exists)
//!
//! A critical failure stops the run immediately.

use std::sync::Arc;

use crate::config::SecurityConfig;
use crate::domain::{CheckOutcome, CheckResult, Provider, SecurityCheck, SecurityReport};
use crate::events::AuditEvent;
use crate::ports::{AuditSink, CredentialProbe};

use super::EndpointPolicyEngine;

/// Hosted AI endpoints that must validate as denied.
pub const EXTERNAL_API_PROBES: &[&str] = &[
    "api.openai.com",
    "api.anthropic.com",
    "generativelanguage.googleapis.com",
];

/// Runs the ordered security checks.
pub struct SecurityGate {
    security: SecurityConfig,
    provider: Provider,
    policy: Arc<EndpointPolicyEngine>,
    credentials: Arc<dyn CredentialProbe>,
    audit: Arc<dyn AuditSink>,
}

impl SecurityGate {
    pub fn new(
        security: SecurityConfig,
        policy: Arc<EndpointPolicyEngine>,
        credentials: Arc<dyn CredentialProbe>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            security,
            provider: Provider::Local,
            policy,
            credentials,
            audit,
        }
    }

    /// Run all checks and report each outcome.
    ///
    /// `report.passed` is true exactly when `report.failed_check()` is `None`.
    pub fn run(&self) -> SecurityReport {
        tracing::info!(target: "airgap.gate", "Running comprehensive security checks");

        let mut checks = Vec::with_capacity(SecurityCheck::ALL.len());
        let mut passed = true;

        for check in SecurityCheck::ALL {
            let outcome = self.evaluate(check);
            self.audit
                .record(AuditEvent::check_completed(check, outcome.clone()));

            let failed = !outcome.is_pass();
            checks.push(CheckResult { check, outcome });

            if failed && check.is_critical() {
                passed = false;
                break;
            }
        }

        let report = SecurityReport { passed, checks };
        self.audit.record(AuditEvent::SecurityGateCompleted {
            passed,
            checks_passed: report.passed_count(),
            checks_total: SecurityCheck::ALL.len(),
        });
        report
    }

    /// Run all checks and return only the verdict.
    pub fn check_security(&self) -> bool {
        self.run().passed
    }

    fn evaluate(&self, check: SecurityCheck) -> CheckOutcome {
        match check {
            SecurityCheck::AirGappedMode => self.check_air_gapped(),
            SecurityCheck::ExternalApiBlocking => self.check_external_apis(),
            SecurityCheck::Encryption => self.check_encryption(),
            SecurityCheck::ProviderIdentity => self.check_provider(),
        }
    }

    fn check_air_gapped(&self) -> CheckOutcome {
        if self.security.air_gapped_mode {
            CheckOutcome::Passed("air-gapped mode enabled".to_string())
        } else {
            CheckOutcome::Failed("air-gapped mode disabled".to_string())
        }
    }

    fn check_external_apis(&self) -> CheckOutcome {
        // Every probe is validated so each denial lands in the violation log.
        let reachable: Vec<&str> = EXTERNAL_API_PROBES
            .iter()
            .copied()
            .filter(|api| self.policy.validate_endpoint(api).allowed)
            .collect();

        if reachable.is_empty() {
            CheckOutcome::Passed("external AI APIs blocked".to_string())
        } else {
            CheckOutcome::Failed(format!("reachable: {}", reachable.join(", ")))
        }
    }

    fn check_encryption(&self) -> CheckOutcome {
        if self.security.encryption_at_rest && self.security.encryption_in_transit {
            CheckOutcome::Passed(format!(
                "encryption: {}",
                self.security.encryption_algorithm
            ))
        } else {
            CheckOutcome::Warning(format!(
                "encryption not fully configured (at_rest={}, in_transit={})",
                self.security.encryption_at_rest, self.security.encryption_in_transit
            ))
        }
    }

    fn check_provider(&self) -> CheckOutcome {
        let found = self.credentials.present_credentials();
        if found.is_empty() {
            CheckOutcome::Passed(format!("provider {} only", self.provider.as_str()))
        } else {
            CheckOutcome::Warning(format!(
                "provider {} only; external credentials present in environment: {}",
                self.provider.as_str(),
                found.join(", ")
            ))
        }
    }
}

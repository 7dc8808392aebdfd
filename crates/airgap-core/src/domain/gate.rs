//! Security gate outcome types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The checks the security gate runs, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityCheck {
    AirGappedMode,
    ExternalApiBlocking,
    Encryption,
    ProviderIdentity,
}

impl SecurityCheck {
    /// All checks in execution order.
    pub const ALL: [Self; 4] = [
        Self::AirGappedMode,
        Self::ExternalApiBlocking,
        Self::Encryption,
        Self::ProviderIdentity,
    ];

    /// Whether a failure of this check fails the whole gate.
    pub const fn is_critical(self) -> bool {
        !matches!(self, Self::Encryption)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AirGappedMode => "air_gapped_mode",
            Self::ExternalApiBlocking => "external_api_blocking",
            Self::Encryption => "encryption",
            Self::ProviderIdentity => "provider_identity",
        }
    }
}

impl fmt::Display for SecurityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed(String),
    Warning(String),
    Failed(String),
}

impl CheckOutcome {
    /// Warnings count as passing.
    pub const fn is_pass(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::Passed(d) | Self::Warning(d) | Self::Failed(d) => d,
        }
    }
}

/// One executed check and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: SecurityCheck,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

/// Full result of one gate run.
///
/// `checks` only lists the checks that actually ran; a critical failure
/// stops the run, so later checks are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityReport {
    pub passed: bool,
    pub checks: Vec<CheckResult>,
}

impl SecurityReport {
    /// The critical check that stopped the run, if any.
    pub fn failed_check(&self) -> Option<&CheckResult> {
        self.checks.iter().find(|c| !c.outcome.is_pass())
    }

    /// Number of checks that passed (warnings included).
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.outcome.is_pass()).count()
    }

    /// Non-fatal findings recorded during the run.
    pub fn warnings(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks
            .iter()
            .filter(|c| matches!(c.outcome, CheckOutcome::Warning(_)))
    }
}

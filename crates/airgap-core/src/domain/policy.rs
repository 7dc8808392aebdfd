//! Egress policy types.
//!
//! A policy is an ordered list of deny patterns plus an exact-match allow
//! list. Patterns are parsed once when the policy is built and never change
//! for the lifetime of a service.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, EgressPolicyConfig};

/// A single deny rule.
///
/// Matching is suffix/equality only. There is no regex support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPattern {
    /// `api.openai.com`: matches the host itself and any subdomain of it.
    Exact(String),
    /// `*.openai.azure.com`: matches any host ending with the suffix, and the
    /// bare domain once the leading `.` is stripped.
    Wildcard {
        /// Everything after the leading `*`.
        suffix: String,
    },
}

impl DomainPattern {
    /// Parse a configured pattern string.
    ///
    /// Patterns are trimmed and lowercased. An empty pattern is rejected.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "empty deny pattern".to_string(),
            ));
        }

        let pattern = pattern.to_ascii_lowercase();
        if let Some(suffix) = pattern.strip_prefix('*') {
            Ok(Self::Wildcard {
                suffix: suffix.to_string(),
            })
        } else {
            Ok(Self::Exact(pattern))
        }
    }

    /// Check whether a (normalized) hostname matches this pattern.
    pub fn matches(&self, hostname: &str) -> bool {
        match self {
            Self::Wildcard { suffix } => {
                hostname.ends_with(suffix.as_str())
                    || suffix
                        .strip_prefix('.')
                        .is_some_and(|bare| hostname == bare)
            }
            Self::Exact(entry) => {
                hostname == entry
                    || hostname
                        .strip_suffix(entry.as_str())
                        .is_some_and(|head| head.ends_with('.'))
            }
        }
    }
}

impl fmt::Display for DomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(entry) => f.write_str(entry),
            Self::Wildcard { suffix } => write!(f, "*{suffix}"),
        }
    }
}

/// Why an endpoint was allowed or denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// A deny pattern matched; carries the pattern as configured.
    Denied(String),
    /// The host is on the allow list.
    Whitelisted,
    /// Air-gapped mode is on and the host is not on the allow list.
    NotWhitelistedAirGapped,
    /// Air-gapped mode is off and nothing matched.
    DefaultAllow,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied(pattern) => f.write_str(pattern),
            Self::Whitelisted => f.write_str("whitelisted"),
            Self::NotWhitelistedAirGapped => {
                f.write_str("not whitelisted under air-gapped policy")
            }
            Self::DefaultAllow => f.write_str("default allow"),
        }
    }
}

/// Outcome of a single endpoint validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub allowed: bool,
    /// Always populated, including on success.
    pub reason: String,
}

impl ValidationResult {
    pub(crate) fn from_reason(reason: &ValidationReason) -> Self {
        let allowed = matches!(
            reason,
            ValidationReason::Whitelisted | ValidationReason::DefaultAllow
        );
        Self {
            allowed,
            reason: reason.to_string(),
        }
    }
}

/// The compiled egress policy.
#[derive(Debug, Clone, Default)]
pub struct EgressPolicy {
    deny_patterns: Vec<DomainPattern>,
    allow_list: HashSet<String>,
}

impl EgressPolicy {
    /// Build a policy from already-parsed patterns and allow-list hosts.
    pub fn new(
        deny_patterns: Vec<DomainPattern>,
        allow_list: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            deny_patterns,
            allow_list: allow_list
                .into_iter()
                .map(|host| normalize_hostname(&host))
                .collect(),
        }
    }

    /// Compile the policy section of the service configuration.
    pub fn from_config(config: &EgressPolicyConfig) -> Result<Self, ConfigError> {
        let deny_patterns = config
            .deny_patterns
            .iter()
            .map(|p| DomainPattern::parse(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(deny_patterns, config.allow_list.iter().cloned()))
    }

    /// First deny pattern matching the hostname, if any.
    pub fn first_deny_match(&self, hostname: &str) -> Option<&DomainPattern> {
        self.deny_patterns.iter().find(|p| p.matches(hostname))
    }

    /// Exact allow-list membership.
    pub fn is_whitelisted(&self, hostname: &str) -> bool {
        self.allow_list.contains(hostname)
    }
}

/// Lowercase and trim a hostname before matching.
pub fn normalize_hostname(hostname: &str) -> String {
    hostname.trim().to_ascii_lowercase()
}

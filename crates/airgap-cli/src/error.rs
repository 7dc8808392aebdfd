//! CLI-specific error types and mappings.
//!
//! Maps `ServiceError` and `ConfigError` to exit codes and user-facing
//! messages.

use airgap_core::{ConfigError, ServiceError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core service error.
    #[error("{0}")]
    Service(String),

    /// The service could not be brought up (security gate or model load).
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The security gate reported a critical failure.
    #[error("Security check failed: {0}")]
    SecurityCheck(String),

    /// One or more endpoints were denied by the egress policy.
    #[error("{0} endpoint(s) denied by egress policy")]
    EndpointsDenied(usize),

    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Service(_) | Self::EndpointsDenied(_) => 1,
            Self::Arguments(_) => 2,
            Self::Unavailable(_) => 69,   // EX_UNAVAILABLE
            Self::Io(_) => 74,            // EX_IOERR
            Self::SecurityCheck(_) => 77, // EX_NOPERM
            Self::Config(_) => 78,        // EX_CONFIG
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotInitialized | ServiceError::SecurityGate { .. } => {
                Self::Unavailable(err.to_string())
            }
            ServiceError::Engine(engine_err) if engine_err.is_load_failure() => {
                Self::Unavailable(engine_err.to_string())
            }
            ServiceError::Engine(engine_err) => Self::Service(engine_err.to_string()),
            ServiceError::Config(config_err) => config_err.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Arguments(format!("invalid JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airgap_core::{EngineError, SecurityCheck};

    #[test]
    fn test_service_errors_map_to_exit_codes() {
        let cases = [
            (ServiceError::NotInitialized, 69),
            (
                ServiceError::SecurityGate {
                    check: SecurityCheck::AirGappedMode,
                    reason: "disabled".into(),
                },
                69,
            ),
            (ServiceError::Engine(EngineError::Warmup("oom".into())), 69),
            (ServiceError::Engine(EngineError::Timeout(5)), 1),
            (ServiceError::Config(ConfigError::NoGpus), 78),
        ];
        for (err, code) in cases {
            let label = err.to_string();
            assert_eq!(CliError::from(err).exit_code(), code, "{label}");
        }
    }

    #[test]
    fn test_io_error_exit_code() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn test_gate_and_denials() {
        assert_eq!(CliError::SecurityCheck("x".into()).exit_code(), 77);
        assert_eq!(CliError::EndpointsDenied(2).to_string(), "2 endpoint(s) denied by egress policy");
    }
}

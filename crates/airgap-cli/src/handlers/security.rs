//! Security command handlers - gate report and endpoint validation.

use airgap_core::CheckOutcome;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{mark, print_separator};

/// Run the security gate and print one line per executed check.
///
/// Fails with `CliError::SecurityCheck` when a critical check failed.
pub fn check_security(ctx: &CliContext) -> Result<(), CliError> {
    let report = ctx.service.security_report();

    println!("{:<24} {:<8} Detail", "Check", "Outcome");
    print_separator(72);
    for result in &report.checks {
        let outcome = match result.outcome {
            CheckOutcome::Passed(_) => "PASS",
            CheckOutcome::Warning(_) => "WARN",
            CheckOutcome::Failed(_) => "FAIL",
        };
        println!(
            "{:<24} {:<8} {}",
            result.check.as_str(),
            outcome,
            result.outcome.detail()
        );
    }
    print_separator(72);
    println!(
        "Security gate: {} ({}/{} checks passed)",
        mark(report.passed),
        report.passed_count(),
        report.checks.len()
    );

    match report.failed_check() {
        Some(failed) => Err(CliError::SecurityCheck(format!(
            "{}: {}",
            failed.check,
            failed.outcome.detail()
        ))),
        None => Ok(()),
    }
}

/// Validate each hostname and print the verdict.
///
/// Fails with `CliError::EndpointsDenied` when any host was denied.
pub fn validate(ctx: &CliContext, hosts: &[String]) -> Result<(), CliError> {
    let mut denied = 0;
    for host in hosts {
        let result = ctx.service.validate_endpoint(host);
        let verdict = if result.allowed { "ALLOW" } else { "DENY" };
        if !result.allowed {
            denied += 1;
        }
        println!("{verdict:<6} {host:<40} {}", result.reason);
    }

    if denied > 0 {
        Err(CliError::EndpointsDenied(denied))
    } else {
        Ok(())
    }
}

//! Analyze command handler.
//!
//! Reads a pollution report from a JSON file, or uses a built-in sample when
//! no file is given.

use std::path::Path;

use airgap_core::PollutionReport;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_json;

/// A representative citizen report for demos and smoke tests.
pub fn sample_report() -> PollutionReport {
    PollutionReport {
        report_id: Some("RPT-2024-001234".to_string()),
        location: Some("Connaught Place, New Delhi".to_string()),
        pm25: Some(245.0),
        pm10: Some(389.0),
        aqi: Some(312.0),
        description: Some("Heavy smog observed, visibility reduced to 200m".to_string()),
        timestamp: Some("2024-01-15T08:30:00Z".to_string()),
    }
}

/// Load a report from a JSON file.
pub fn load_report(path: &Path) -> Result<PollutionReport, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Initialize the service and print the analysis as JSON.
pub async fn execute(ctx: &CliContext, file: Option<&Path>) -> Result<(), CliError> {
    let report = match file {
        Some(path) => load_report(path)?,
        None => {
            tracing::info!("No report file given; analyzing built-in sample report");
            sample_report()
        }
    };

    let service = ctx.ready().await?;
    let analysis = service.analyze_pollution_report(&report).await?;
    print_json(&analysis)
}

//! Pollution report analysis types.
//!
//! Prompt construction and severity assessment are pure functions of the
//! report; they never fail on missing fields.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::inference::InferenceMetadata;

/// A citizen or sensor pollution report. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutionReport {
    pub report_id: Option<String>,
    pub location: Option<String>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub aqi: Option<f64>,
    pub description: Option<String>,
    pub timestamp: Option<String>,
}

/// AQI severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl Severity {
    /// Band an AQI reading. A missing reading counts as zero.
    pub fn from_aqi(aqi: Option<f64>) -> Self {
        let aqi = aqi.unwrap_or(0.0);
        if aqi >= 400.0 {
            Self::Severe
        } else if aqi >= 300.0 {
            Self::VeryPoor
        } else if aqi >= 200.0 {
            Self::Poor
        } else if aqi >= 100.0 {
            Self::Moderate
        } else {
            Self::Satisfactory
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Satisfactory => "SATISFACTORY",
            Self::Moderate => "MODERATE",
            Self::Poor => "POOR",
            Self::VeryPoor => "VERY_POOR",
            Self::Severe => "SEVERE",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured analysis of a pollution report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub report_id: Option<String>,
    pub ai_analysis: String,
    pub confidence_score: f64,
    pub recommendations: Vec<String>,
    pub severity_assessment: Severity,
    pub metadata: InferenceMetadata,
}

struct Field<'a, T>(&'a Option<T>, &'static str);

impl<T: Display> Display for Field<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(self.1),
        }
    }
}

/// Build the analysis prompt for a report.
pub fn build_analysis_prompt(report: &PollutionReport) -> String {
    format!(
        "\nAnalyze the following pollution report and provide:\n\
         1. Assessment of pollution severity\n\
         2. Likely sources of pollution\n\
         3. Recommended actions\n\
         4. Health advisory if needed\n\
         \n\
         Report Data:\n\
         - Location: {}\n\
         - PM2.5: {} µg/m³\n\
         - PM10: {} µg/m³\n\
         - AQI: {}\n\
         - Description: {}\n\
         - Time: {}\n\
         \n\
         Provide analysis in a structured format.\n",
        Field(&report.location, "Unknown"),
        Field(&report.pm25, "N/A"),
        Field(&report.pm10, "N/A"),
        Field(&report.aqi, "N/A"),
        Field(&report.description, "No description"),
        Field(&report.timestamp, "Unknown"),
    )
}

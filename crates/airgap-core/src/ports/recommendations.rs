//! Recommendation extraction port.
//!
//! There is no NLP step behind this yet: the default extractor returns a
//! fixed list regardless of the analysis text.

/// Confidence score reported with every analysis.
pub const ANALYSIS_CONFIDENCE: f64 = 0.94;

/// Turns free-form analysis text into actionable recommendations.
pub trait RecommendationExtractor: Send + Sync {
    fn extract(&self, analysis_text: &str) -> Vec<String>;
}

/// Fixed placeholder recommendations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRecommendations;

impl StaticRecommendations {
    pub const ITEMS: &'static [&'static str] = &[
        "Increase monitoring frequency in affected area",
        "Issue health advisory for sensitive groups",
        "Coordinate with traffic management for vehicle restrictions",
        "Deploy additional mobile monitoring units",
    ];
}

impl RecommendationExtractor for StaticRecommendations {
    fn extract(&self, _analysis_text: &str) -> Vec<String> {
        Self::ITEMS.iter().map(ToString::to_string).collect()
    }
}

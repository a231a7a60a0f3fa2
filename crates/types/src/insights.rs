//! Business-facing reports

use serde::{Deserialize, Serialize};

/// Data sufficiency and completeness score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityReport {
    /// 0..=100
    pub score: u32,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Qualitative findings derived from a statistical summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastInsights {
    pub opportunities: Vec<String>,
    pub risk_factors: Vec<String>,
    pub actionable_recommendations: Vec<String>,
}

impl ForecastInsights {
    /// Whether no rule fired
    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
            && self.risk_factors.is_empty()
            && self.actionable_recommendations.is_empty()
    }
}

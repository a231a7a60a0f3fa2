//! Trend analysis results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall direction of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Verdict of the Mann-Kendall test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MannKendallTrend {
    #[serde(rename = "increasing")]
    Increasing,
    #[serde(rename = "decreasing")]
    Decreasing,
    #[serde(rename = "no trend")]
    NoTrend,
}

/// Ordinary least squares fit of value against sequential index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 0 for a constant series
    pub r_squared: f64,
}

/// Non-parametric monotonic trend test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannKendallResult {
    /// S statistic: sum of pairwise signs
    pub s: i64,
    /// Continuity-corrected normal score
    pub z: f64,
    /// Kendall's tau
    pub tau: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    pub trend: MannKendallTrend,
}

/// Condensed trend view embedded in a summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    pub strength: f64,
    pub confidence: f64,
}

/// Complete trend analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    /// Slope magnitude divided by the (signed) mean, or by 1 when the mean is 0
    pub strength: f64,
    /// `r_squared * (1 - mann_kendall.p_value)`
    pub confidence: f64,
    pub linear_regression: LinearRegression,
    pub mann_kendall: MannKendallResult,
}

impl TrendAnalysis {
    /// Summary view of this analysis
    pub fn summary(&self) -> TrendSummary {
        TrendSummary {
            direction: self.direction,
            strength: self.strength,
            confidence: self.confidence,
        }
    }
}

/// Location where the series mean shifts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    /// Position in the chronologically ordered series
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    /// Mean after minus mean before
    pub shift: f64,
    /// 1 - p-value of the mean shift (0..1)
    pub significance: f64,
}

//! Seasonality analysis results

use serde::{Deserialize, Serialize};

/// A candidate period retained by the autocorrelation search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPeriod {
    pub period: usize,
    /// Lag autocorrelation at `period`
    pub strength: f64,
    /// Average correlation between full cycles
    pub confidence: f64,
}

/// Condensed seasonality view embedded in a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalitySummary {
    pub detected: bool,
    pub periods: Vec<SeasonalPeriod>,
    pub strength: f64,
}

/// Complete seasonality analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityAnalysis {
    pub detected: bool,
    /// Retained periods, strongest first
    pub periods: Vec<SeasonalPeriod>,
    pub strength: f64,
    pub dominant_period: Option<usize>,
}

impl SeasonalityAnalysis {
    /// Summary view of this analysis
    pub fn summary(&self) -> SeasonalitySummary {
        SeasonalitySummary {
            detected: self.detected,
            periods: self.periods.clone(),
            strength: self.strength,
        }
    }
}

/// Additive decomposition into trend, seasonal and residual components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub period: usize,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    /// Per-phase mean relative to the overall mean
    pub seasonal_index: Vec<f64>,
}

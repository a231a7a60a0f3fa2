//! Descriptive and distribution statistics

use serde::{Deserialize, Serialize};

use crate::outliers::OutlierResult;
use crate::seasonality::SeasonalitySummary;
use crate::trend::TrendSummary;

/// Quartiles computed by linear-interpolation percentiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Observed value range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Normal-approximation confidence interval for the mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Confidence level (e.g. 0.95)
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Location and spread of the observed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    pub mean: f64,
    pub median: f64,
    /// Values tied at the highest frequency; empty unless that frequency exceeds 1
    pub mode: Vec<f64>,
    pub standard_deviation: f64,
    /// Population variance (divides by n)
    pub variance: f64,
    pub quartiles: Quartiles,
    pub range: ValueRange,
    /// Intervals for the mean at 90%, 95% and 99%
    pub confidence_intervals: Vec<ConfidenceInterval>,
}

impl DescriptiveStatistics {
    /// Coefficient of variation (`stddev / mean`).
    ///
    /// A zero mean yields infinity when the values vary and 0 when they don't.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            if self.standard_deviation > 0.0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else {
            self.standard_deviation / self.mean
        }
    }
}

/// Outcome of a normality check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityTest {
    pub statistic: f64,
    pub p_value: f64,
    pub is_normal: bool,
}

impl NormalityTest {
    /// Result used when the sample is too small to say anything
    pub fn inconclusive() -> Self {
        Self {
            statistic: 0.0,
            p_value: 1.0,
            is_normal: true,
        }
    }
}

/// Shape of the value distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionDiagnostics {
    /// Adjusted Fisher-Pearson skewness
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
    pub normality: NormalityTest,
}

/// Full statistical characterization of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub descriptive: DescriptiveStatistics,
    pub distribution: DistributionDiagnostics,
    pub trend: TrendSummary,
    pub seasonality: SeasonalitySummary,
    /// IQR outliers, present only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outliers: Option<OutlierResult>,
}

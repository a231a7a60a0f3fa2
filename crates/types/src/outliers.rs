//! Outlier detection results

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Outlier detection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Tukey fences around the interquartile range
    #[default]
    Iqr,
    /// Modified z-score over the median absolute deviation
    Mad,
    /// Standard z-score
    Zscore,
}

impl OutlierMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlierMethod::Iqr => "iqr",
            OutlierMethod::Mad => "mad",
            OutlierMethod::Zscore => "zscore",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlierMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iqr" => Ok(OutlierMethod::Iqr),
            "mad" => Ok(OutlierMethod::Mad),
            "zscore" => Ok(OutlierMethod::Zscore),
            other => Err(AnalysisError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Value bounds outside of which a point is an outlier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierThresholds {
    pub lower: f64,
    pub upper: f64,
}

/// Points flagged by one detection method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierResult {
    pub method: OutlierMethod,
    /// Positions in the input slice, ascending
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    /// Bounds used by the IQR method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<OutlierThresholds>,
    /// Cutoff used by the z-score method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zscore_threshold: Option<f64>,
}

impl OutlierResult {
    /// Result with nothing flagged
    pub fn empty(method: OutlierMethod) -> Self {
        Self {
            method,
            indices: Vec::new(),
            values: Vec::new(),
            thresholds: None,
            zscore_threshold: None,
        }
    }

    /// Number of flagged points
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing was flagged
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// How far an outlier sits from the bulk of the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A flagged point with its severity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessedOutlier {
    pub index: usize,
    pub value: f64,
    /// Population z-score of the value
    pub z_score: f64,
    /// Distance beyond the nearest detection bound
    pub distance_from_threshold: f64,
    pub severity: OutlierSeverity,
}

/// Count of outliers per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityBreakdown {
    /// Count one more outlier of the given severity
    pub fn record(&mut self, severity: OutlierSeverity) {
        match severity {
            OutlierSeverity::Low => self.low += 1,
            OutlierSeverity::Medium => self.medium += 1,
            OutlierSeverity::High => self.high += 1,
            OutlierSeverity::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// Severity assessment of a detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierAssessment {
    pub method: OutlierMethod,
    pub total_points: usize,
    /// Share of points flagged, in percent
    pub outlier_percentage: f64,
    pub outliers: Vec<AssessedOutlier>,
    pub severity_breakdown: SeverityBreakdown,
}

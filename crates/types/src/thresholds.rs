//! Business-tuned thresholds for analysis and insight rules
//!
//! The constants carry the calibrated defaults. [`AnalyzerThresholds`] and
//! [`InsightThresholds`] start from them and can be overridden through
//! configuration without touching the algorithms.

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, Result};

/// Tukey fence multiplier for IQR outliers
pub const IQR_MULTIPLIER: f64 = 1.5;
/// Scale factor turning a MAD deviation into a modified z-score
pub const MAD_SCALE: f64 = 0.6745;
/// Modified z-score above which a point is a MAD outlier
pub const MAD_MODIFIED_Z_CUTOFF: f64 = 3.5;
/// Default z-score cutoff
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;
/// Floor applied to MAD and standard deviation before dividing
pub const DIVISION_FLOOR: f64 = 1e-9;

/// Slope below this fraction of `|mean|` is a stable trend
pub const TREND_SLOPE_FRACTION: f64 = 0.01;
/// Mann-Kendall significance level
pub const MANN_KENDALL_ALPHA: f64 = 0.05;
/// Normality p-value above which a sample is considered normal
pub const NORMALITY_ALPHA: f64 = 0.05;

/// Periods tested for seasonality (day-oriented business cadences)
pub const SEASONAL_CANDIDATE_PERIODS: [usize; 5] = [7, 14, 30, 60, 90];
/// Lag autocorrelation a period needs to be retained
pub const SEASONALITY_ACF_FLOOR: f64 = 0.2;
/// Top period strength required to report seasonality
pub const SEASONALITY_DETECTION_THRESHOLD: f64 = 0.3;

/// Minimum window for mean-shift change points
pub const CHANGE_POINT_MIN_WINDOW: usize = 5;
/// Mean shift, in standard deviations, that marks a change point
pub const CHANGE_POINT_SIGMA: f64 = 1.5;

/// Trend confidence required before a trend insight is raised
pub const TREND_CONFIDENCE_THRESHOLD: f64 = 0.7;
/// Coefficient of variation above which a series is volatile
pub const VOLATILITY_CV_THRESHOLD: f64 = 0.3;
/// Fewer points than this is flagged as limited data
pub const MIN_RELIABLE_POINTS: usize = 30;
/// Score deducted when values are missing
pub const MISSING_VALUES_PENALTY: u32 = 20;
/// Score deducted for limited data
pub const LIMITED_DATA_PENALTY: u32 = 10;

/// Test used to fill `distribution.normality`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalityMethod {
    /// Empirical-CDF distance heuristic; a rough indicator, not a calibrated test
    #[default]
    Heuristic,
    /// Jarque-Bera test on skewness and excess kurtosis
    JarqueBera,
}

/// Thresholds used by the statistical analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerThresholds {
    /// Outlier detection
    pub iqr_multiplier: f64,
    pub mad_cutoff: f64,
    pub zscore_threshold: f64,

    /// Trend
    pub trend_slope_fraction: f64,
    pub mann_kendall_alpha: f64,

    /// Distribution
    pub normality_alpha: f64,
    pub normality_method: NormalityMethod,

    /// Seasonality
    pub candidate_periods: Vec<usize>,
    pub acf_floor: f64,
    pub detection_threshold: f64,

    /// Change points
    pub change_point_min_window: usize,
    pub change_point_sigma: f64,
}

impl Default for AnalyzerThresholds {
    fn default() -> Self {
        Self {
            iqr_multiplier: IQR_MULTIPLIER,
            mad_cutoff: MAD_MODIFIED_Z_CUTOFF,
            zscore_threshold: DEFAULT_ZSCORE_THRESHOLD,
            trend_slope_fraction: TREND_SLOPE_FRACTION,
            mann_kendall_alpha: MANN_KENDALL_ALPHA,
            normality_alpha: NORMALITY_ALPHA,
            normality_method: NormalityMethod::default(),
            candidate_periods: SEASONAL_CANDIDATE_PERIODS.to_vec(),
            acf_floor: SEASONALITY_ACF_FLOOR,
            detection_threshold: SEASONALITY_DETECTION_THRESHOLD,
            change_point_min_window: CHANGE_POINT_MIN_WINDOW,
            change_point_sigma: CHANGE_POINT_SIGMA,
        }
    }
}

impl AnalyzerThresholds {
    /// Check that every threshold is usable
    pub fn validate(&self) -> Result<()> {
        positive("iqr_multiplier", self.iqr_multiplier)?;
        positive("mad_cutoff", self.mad_cutoff)?;
        positive("zscore_threshold", self.zscore_threshold)?;
        positive("change_point_sigma", self.change_point_sigma)?;
        non_negative("trend_slope_fraction", self.trend_slope_fraction)?;
        probability("mann_kendall_alpha", self.mann_kendall_alpha)?;
        probability("normality_alpha", self.normality_alpha)?;

        if !(-1.0..=1.0).contains(&self.acf_floor) {
            return Err(AnalysisError::InvalidParameter(
                "acf_floor must be within [-1, 1]".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.detection_threshold) {
            return Err(AnalysisError::InvalidParameter(
                "detection_threshold must be within [-1, 1]".to_string(),
            ));
        }
        if self.candidate_periods.iter().any(|&p| p < 2) {
            return Err(AnalysisError::InvalidParameter(
                "candidate periods must be at least 2".to_string(),
            ));
        }
        if self.change_point_min_window == 0 {
            return Err(AnalysisError::InvalidParameter(
                "change_point_min_window must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Thresholds used by the insights generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    pub trend_confidence: f64,
    pub volatility_cv: f64,
    pub min_reliable_points: usize,
    pub missing_values_penalty: u32,
    pub limited_data_penalty: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            trend_confidence: TREND_CONFIDENCE_THRESHOLD,
            volatility_cv: VOLATILITY_CV_THRESHOLD,
            min_reliable_points: MIN_RELIABLE_POINTS,
            missing_values_penalty: MISSING_VALUES_PENALTY,
            limited_data_penalty: LIMITED_DATA_PENALTY,
        }
    }
}

impl InsightThresholds {
    /// Check that every threshold is usable
    pub fn validate(&self) -> Result<()> {
        probability("trend_confidence", self.trend_confidence)?;
        non_negative("volatility_cv", self.volatility_cv)?;

        if self.missing_values_penalty > 100 || self.limited_data_penalty > 100 {
            return Err(AnalysisError::InvalidParameter(
                "score penalties must not exceed 100".to_string(),
            ));
        }

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidParameter(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}

fn probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AnalysisError::InvalidParameter(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

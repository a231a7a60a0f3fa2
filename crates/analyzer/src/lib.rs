//! Statistical characterization of business time series
//!
//! The analyzer turns a sequence of timestamped observations into:
//!
//! - **Descriptive statistics**: location, spread, quartiles, mode, mean confidence intervals
//! - **Distribution diagnostics**: skewness, excess kurtosis, a normality indicator
//! - **Trend analysis**: least squares fit blended with a Mann-Kendall test
//! - **Seasonality**: autocorrelation search over business-cadence periods
//! - **Outliers**: IQR, MAD and z-score detection with severity grading
//!
//! plus change-point detection, seasonal decomposition and forecast
//! validation. All functions are pure and synchronous.
//!
//! # Example
//!
//! ```rust,no_run
//! use analyzer::StatisticalAnalyzer;
//! use chrono::{Duration, Utc};
//! use series_insights_types::DataPoint;
//!
//! let start = Utc::now();
//! let points: Vec<DataPoint> = (0..40)
//!     .map(|i| DataPoint::new(start + Duration::days(i), 100.0 + 5.0 * i as f64))
//!     .collect();
//!
//! let analyzer = StatisticalAnalyzer::default();
//! let summary = analyzer.generate_summary(&points, true)?;
//! println!("trend: {:?}", summary.trend.direction);
//! # Ok::<(), series_insights_types::AnalysisError>(())
//! ```

pub mod analyzer;
pub mod descriptive;
pub mod distribution;
pub mod numeric;
pub mod outliers;
pub mod seasonality;
pub mod trend;
pub mod validation;

pub use analyzer::StatisticalAnalyzer;

use series_insights_types::{
    thresholds::DEFAULT_ZSCORE_THRESHOLD, AnalyzerThresholds, ChangePoint, DataPoint,
    Decomposition, ForecastValidation, NormalityTest, OutlierAssessment, OutlierMethod,
    OutlierResult, Result, SeasonalityAnalysis, StatisticalSummary, TrendAnalysis,
};

/// Summary of `points` with default thresholds
pub fn generate_summary(points: &[DataPoint], include_outliers: bool) -> Result<StatisticalSummary> {
    StatisticalAnalyzer::default().generate_summary(points, include_outliers)
}

/// Outlier detection with default thresholds
pub fn detect_outliers(values: &[f64], method: OutlierMethod, z_threshold: f64) -> Result<OutlierResult> {
    StatisticalAnalyzer::default().detect_outliers(values, method, z_threshold)
}

/// Outlier detection by method name (`iqr`, `mad` or `zscore`).
///
/// Unknown names fail with [`series_insights_types::AnalysisError::UnsupportedMethod`].
pub fn detect_outliers_by_name(values: &[f64], method: &str, z_threshold: Option<f64>) -> Result<OutlierResult> {
    let method: OutlierMethod = method.parse()?;
    detect_outliers(values, method, z_threshold.unwrap_or(DEFAULT_ZSCORE_THRESHOLD))
}

pub fn assess_outliers(values: &[f64], result: &OutlierResult) -> Result<OutlierAssessment> {
    StatisticalAnalyzer::default().assess_outliers(values, result)
}

pub fn analyze_trend(points: &[DataPoint]) -> Result<TrendAnalysis> {
    StatisticalAnalyzer::default().analyze_trend(points)
}

pub fn analyze_seasonality(points: &[DataPoint]) -> Result<SeasonalityAnalysis> {
    StatisticalAnalyzer::default().analyze_seasonality(points)
}

pub fn detect_change_points(points: &[DataPoint]) -> Result<Vec<ChangePoint>> {
    StatisticalAnalyzer::default().detect_change_points(points)
}

/// Additive decomposition of `values` with the given period
pub fn decompose(values: &[f64], period: usize) -> Result<Decomposition> {
    crate::analyzer::ensure_finite(values)?;
    seasonality::decompose(values, period)
}

/// Accuracy and residual diagnostics of `predicted` against `actual`
pub fn validate_forecast(actual: &[f64], predicted: &[f64]) -> Result<ForecastValidation> {
    crate::analyzer::ensure_finite(actual)?;
    crate::analyzer::ensure_finite(predicted)?;
    validation::validate(actual, predicted)
}

/// Jarque-Bera normality test at the default significance level
pub fn jarque_bera(values: &[f64]) -> NormalityTest {
    distribution::jarque_bera(values, AnalyzerThresholds::default().normality_alpha)
}

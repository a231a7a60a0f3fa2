//! Forecast validation results

use serde::{Deserialize, Serialize};

/// Point-forecast error metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    /// Mean absolute percentage error over non-zero actuals
    pub mape: Option<f64>,
    pub rmse: f64,
    pub mae: f64,
    /// Mean absolute scaled error against the one-step naive forecast
    pub mase: Option<f64>,
}

/// Ljung-Box portmanteau test on residual autocorrelation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LjungBoxTest {
    pub statistic: f64,
    pub lags: usize,
    pub p_value: f64,
    pub is_significant: bool,
}

/// Diagnostics of forecast residuals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualAnalysis {
    pub is_white_noise: bool,
    /// Residual autocorrelation for lags 1..
    pub autocorrelation: Vec<f64>,
    pub ljung_box: LjungBoxTest,
}

/// Interval around a single predicted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence: f64,
}

/// Comparison of a forecast against realized values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastValidation {
    pub accuracy: ForecastAccuracy,
    pub residual_analysis: ResidualAnalysis,
    pub prediction_intervals: Vec<PredictionInterval>,
}

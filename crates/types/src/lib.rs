//! Core types and data models for time-series insights
//!
//! This crate provides the value objects exchanged between the statistical
//! analyzer, the insights generator and their callers, together with the
//! error taxonomy and the tunable thresholds shared by both.

pub mod data;
pub mod errors;
pub mod insights;
pub mod outliers;
pub mod seasonality;
pub mod statistics;
pub mod thresholds;
pub mod trend;
pub mod validation;

pub use data::DataPoint;
pub use errors::{AnalysisError, Result};
pub use insights::{DataQualityReport, ForecastInsights};
pub use outliers::{
    AssessedOutlier, OutlierAssessment, OutlierMethod, OutlierResult, OutlierSeverity,
    OutlierThresholds, SeverityBreakdown,
};
pub use seasonality::{Decomposition, SeasonalPeriod, SeasonalityAnalysis, SeasonalitySummary};
pub use statistics::{
    ConfidenceInterval, DescriptiveStatistics, DistributionDiagnostics, NormalityTest, Quartiles,
    StatisticalSummary, ValueRange,
};
pub use thresholds::{AnalyzerThresholds, InsightThresholds, NormalityMethod};
pub use trend::{
    ChangePoint, LinearRegression, MannKendallResult, MannKendallTrend, TrendAnalysis,
    TrendDirection, TrendSummary,
};
pub use validation::{
    ForecastAccuracy, ForecastValidation, LjungBoxTest, PredictionInterval, ResidualAnalysis,
};

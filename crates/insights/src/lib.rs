//! Insights Generator
//!
//! Maps statistical summaries and raw data-quality signals onto short,
//! fixed business phrases. No new statistics are computed here.
//!
//! - **Data quality**: a 0..=100 score with issues and recommendations
//! - **Forecast insights**: opportunities, risk factors and recommendations
//!   from trend, seasonality, volatility and normality

pub mod forecast;
pub mod quality;

use series_insights_types::{
    DataPoint, DataQualityReport, ForecastInsights, InsightThresholds, Result, StatisticalSummary,
};

/// Stateless generator parameterized by its thresholds
#[derive(Debug, Clone, Default)]
pub struct InsightsGenerator {
    thresholds: InsightThresholds,
}

impl InsightsGenerator {
    /// Create a generator with validated thresholds
    pub fn new(thresholds: InsightThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    pub fn generate_data_quality_report(&self, points: &[DataPoint]) -> DataQualityReport {
        quality::report(points, &self.thresholds)
    }

    pub fn generate_forecast_insights(&self, summary: &StatisticalSummary) -> ForecastInsights {
        forecast::insights(summary, &self.thresholds)
    }
}

/// Data-quality report with default thresholds
pub fn generate_data_quality_report(points: &[DataPoint]) -> DataQualityReport {
    InsightsGenerator::default().generate_data_quality_report(points)
}

/// Forecast insights with default thresholds
pub fn generate_forecast_insights(summary: &StatisticalSummary) -> ForecastInsights {
    InsightsGenerator::default().generate_forecast_insights(summary)
}

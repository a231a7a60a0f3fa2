//! Forecast insights from a statistical summary

use series_insights_types::{ForecastInsights, InsightThresholds, StatisticalSummary, TrendDirection};
use tracing::debug;

pub const GROWTH_OPPORTUNITY: &str = "Strong upward trend detected - growth opportunity";
pub const SCALE_RECOMMENDATION: &str = "Consider scaling operations to meet increasing demand";
pub const DECLINE_RISK: &str = "Declining trend detected";
pub const INVESTIGATE_RECOMMENDATION: &str =
    "Investigate root causes and implement corrective measures";
pub const SEASONAL_RECOMMENDATION: &str = "Plan inventory and resources based on seasonal patterns";
pub const VOLATILITY_RISK: &str = "High volatility in data";
pub const VOLATILITY_RECOMMENDATION: &str =
    "Monitor closely and consider risk mitigation strategies";
pub const NON_NORMAL_RECOMMENDATION: &str =
    "Data shows non-normal distribution - consider appropriate forecasting methods";

/// Apply the insight rules to `summary`, in a fixed order
pub fn insights(summary: &StatisticalSummary, thresholds: &InsightThresholds) -> ForecastInsights {
    let mut insights = ForecastInsights::default();
    let trend = &summary.trend;

    if trend.confidence > thresholds.trend_confidence {
        match trend.direction {
            TrendDirection::Increasing => {
                insights.opportunities.push(GROWTH_OPPORTUNITY.to_string());
                insights
                    .actionable_recommendations
                    .push(SCALE_RECOMMENDATION.to_string());
            }
            TrendDirection::Decreasing => {
                insights.risk_factors.push(DECLINE_RISK.to_string());
                insights
                    .actionable_recommendations
                    .push(INVESTIGATE_RECOMMENDATION.to_string());
            }
            TrendDirection::Stable => {}
        }
    }

    if summary.seasonality.detected {
        if let Some(dominant) = summary.seasonality.periods.first() {
            insights.opportunities.push(format!(
                "Seasonal pattern identified ({}-period cycle)",
                dominant.period
            ));
        }
        insights
            .actionable_recommendations
            .push(SEASONAL_RECOMMENDATION.to_string());
    }

    if summary.descriptive.coefficient_of_variation() > thresholds.volatility_cv {
        insights.risk_factors.push(VOLATILITY_RISK.to_string());
        insights
            .actionable_recommendations
            .push(VOLATILITY_RECOMMENDATION.to_string());
    }

    if !summary.distribution.normality.is_normal {
        insights
            .actionable_recommendations
            .push(NON_NORMAL_RECOMMENDATION.to_string());
    }

    debug!(
        opportunities = insights.opportunities.len(),
        risks = insights.risk_factors.len(),
        recommendations = insights.actionable_recommendations.len(),
        "forecast insights generated"
    );

    insights
}

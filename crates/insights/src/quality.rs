//! Data quality scoring

use series_insights_types::{DataPoint, DataQualityReport, InsightThresholds};
use tracing::debug;

pub const MISSING_VALUES_ISSUE: &str = "Missing values detected";
pub const MISSING_VALUES_RECOMMENDATION: &str =
    "Handle missing values through imputation or removal";
pub const LIMITED_DATA_ISSUE: &str = "Limited data points available";
pub const LIMITED_DATA_RECOMMENDATION: &str = "Collect more data for robust analysis";

const FULL_SCORE: u32 = 100;

/// Score completeness and sufficiency of `points`.
///
/// Starts at 100 and subtracts a penalty per problem found, never going
/// below 0.
pub fn report(points: &[DataPoint], thresholds: &InsightThresholds) -> DataQualityReport {
    let mut score = FULL_SCORE;
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    let missing = points.iter().filter(|p| p.is_missing()).count();
    if missing > 0 {
        score = score.saturating_sub(thresholds.missing_values_penalty);
        issues.push(MISSING_VALUES_ISSUE.to_string());
        recommendations.push(MISSING_VALUES_RECOMMENDATION.to_string());
    }

    if points.len() < thresholds.min_reliable_points {
        score = score.saturating_sub(thresholds.limited_data_penalty);
        issues.push(LIMITED_DATA_ISSUE.to_string());
        recommendations.push(LIMITED_DATA_RECOMMENDATION.to_string());
    }

    debug!(points = points.len(), missing, score, "data quality scored");

    DataQualityReport {
        score,
        issues,
        recommendations,
    }
}

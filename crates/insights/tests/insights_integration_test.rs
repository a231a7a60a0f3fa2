//! End-to-end tests: analyzer summaries flowing into the insights generator

use chrono::{Duration, TimeZone, Utc};
use insights::{
    forecast, generate_data_quality_report, generate_forecast_insights, quality,
    InsightsGenerator,
};
use series_insights_types::{DataPoint, InsightThresholds};

// ============================================================================
// HELPERS
// ============================================================================

fn weekly(values: &[f64]) -> Vec<DataPoint> {
    let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DataPoint::new(start + Duration::weeks(i as i64), *v))
        .collect()
}

// ============================================================================
// DATA QUALITY
// ============================================================================

#[test]
fn test_ten_clean_points_score_ninety() {
    let report = generate_data_quality_report(&weekly(&[5.0; 10]));

    assert_eq!(report.score, 90);
    assert_eq!(report.issues, vec!["Limited data points available".to_string()]);
}

#[test]
fn test_null_values_from_json_are_penalized() {
    let json = r#"[
        {"timestamp": "2024-01-01T00:00:00Z", "value": 1.0},
        {"timestamp": "2024-01-08T00:00:00Z", "value": null},
        {"timestamp": "2024-01-15T00:00:00Z", "value": 3.0}
    ]"#;
    let points: Vec<DataPoint> = serde_json::from_str(json).unwrap();
    let report = generate_data_quality_report(&points);

    assert_eq!(report.score, 70);
    assert!(report.issues.contains(&quality::MISSING_VALUES_ISSUE.to_string()));
    assert!(report
        .recommendations
        .contains(&quality::MISSING_VALUES_RECOMMENDATION.to_string()));
}

#[test]
fn test_custom_reliability_floor() {
    let generator = InsightsGenerator::new(InsightThresholds {
        min_reliable_points: 5,
        ..Default::default()
    })
    .unwrap();

    let report = generator.generate_data_quality_report(&weekly(&[1.0; 10]));
    assert_eq!(report.score, 100);
}

#[test]
fn test_invalid_thresholds_are_rejected() {
    let result = InsightsGenerator::new(InsightThresholds {
        trend_confidence: 1.5,
        ..Default::default()
    });
    assert!(result.is_err());
}

// ============================================================================
// FORECAST INSIGHTS
// ============================================================================

#[test]
fn test_constant_series_has_no_volatility_risk() {
    for value in [0.0, 7.0, 1_000.0, 0.1, 1.0 / 3.0, 1e-7] {
        let summary = analyzer::generate_summary(&weekly(&[value; 40]), false).unwrap();
        let insights = generate_forecast_insights(&summary);

        assert!(!insights
            .risk_factors
            .contains(&forecast::VOLATILITY_RISK.to_string()));
        assert!(insights.opportunities.is_empty());
    }
}

#[test]
fn test_clean_growth_series() {
    let values: Vec<f64> = (0..40).map(|i| 100.0 + 5.0 * i as f64).collect();
    let summary = analyzer::generate_summary(&weekly(&values), false).unwrap();
    let insights = generate_forecast_insights(&summary);

    assert!(insights
        .opportunities
        .contains(&forecast::GROWTH_OPPORTUNITY.to_string()));
    assert!(insights
        .actionable_recommendations
        .contains(&forecast::SCALE_RECOMMENDATION.to_string()));
    assert!(insights.risk_factors.is_empty());
}

#[test]
fn test_clean_decline_series() {
    let values: Vec<f64> = (0..40).map(|i| 500.0 - 4.0 * i as f64).collect();
    let summary = analyzer::generate_summary(&weekly(&values), false).unwrap();
    let insights = generate_forecast_insights(&summary);

    assert!(insights.risk_factors.contains(&forecast::DECLINE_RISK.to_string()));
    assert!(insights.opportunities.is_empty());
}

#[test]
fn test_weekly_seasonality_is_reported() {
    let values: Vec<f64> = (0..56)
        .map(|t| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * t as f64 / 7.0).sin())
        .collect();
    let summary = analyzer::generate_summary(&weekly(&values), false).unwrap();
    let insights = generate_forecast_insights(&summary);

    assert!(insights
        .opportunities
        .contains(&"Seasonal pattern identified (7-period cycle)".to_string()));
}

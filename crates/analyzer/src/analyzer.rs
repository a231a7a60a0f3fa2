//! Statistical analyzer entry point

use series_insights_types::{
    AnalysisError, AnalyzerThresholds, ChangePoint, DataPoint, OutlierAssessment, OutlierMethod,
    OutlierResult, Result, SeasonalityAnalysis, StatisticalSummary, TrendAnalysis,
};
use tracing::{debug, instrument};

use crate::numeric::chronological_values;
use crate::{descriptive, distribution, outliers, seasonality, trend};

/// Stateless analyzer parameterized by its thresholds.
///
/// Every method computes from its arguments alone, so one instance can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct StatisticalAnalyzer {
    thresholds: AnalyzerThresholds,
}

impl StatisticalAnalyzer {
    /// Create an analyzer with validated thresholds
    pub fn new(thresholds: AnalyzerThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &AnalyzerThresholds {
        &self.thresholds
    }

    /// Full statistical summary of a series.
    ///
    /// With `include_outliers` the values are also screened with the IQR
    /// method and the result attached to the summary.
    #[instrument(skip(self, points), fields(n = points.len()))]
    pub fn generate_summary(
        &self,
        points: &[DataPoint],
        include_outliers: bool,
    ) -> Result<StatisticalSummary> {
        let values = checked_values(points)?;
        trend::log_irregular_spacing(points);

        let descriptive = descriptive::describe(&values);
        let distribution = distribution::diagnose(
            &values,
            self.thresholds.normality_method,
            self.thresholds.normality_alpha,
        );
        let trend = trend::analyze(&values, &self.thresholds).summary();
        let seasonality = seasonality::analyze(&values, &self.thresholds).summary();

        let outliers = include_outliers.then(|| {
            outliers::detect(
                &values,
                OutlierMethod::Iqr,
                self.thresholds.zscore_threshold,
                &self.thresholds,
            )
        });

        debug!(
            mean = descriptive.mean,
            std_dev = descriptive.standard_deviation,
            "summary generated"
        );

        Ok(StatisticalSummary {
            descriptive,
            distribution,
            trend,
            seasonality,
            outliers,
        })
    }

    /// Flag outliers in `values`, indices referring to input positions.
    pub fn detect_outliers(
        &self,
        values: &[f64],
        method: OutlierMethod,
        z_threshold: f64,
    ) -> Result<OutlierResult> {
        ensure_finite(values)?;
        if !(z_threshold.is_finite() && z_threshold > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "z threshold must be positive, got {z_threshold}"
            )));
        }
        Ok(outliers::detect(values, method, z_threshold, &self.thresholds))
    }

    /// Severity grading of an earlier detection over the same values
    pub fn assess_outliers(&self, values: &[f64], result: &OutlierResult) -> Result<OutlierAssessment> {
        ensure_finite(values)?;
        outliers::assess(values, result, &self.thresholds)
    }

    #[instrument(skip(self, points), fields(n = points.len()))]
    pub fn analyze_trend(&self, points: &[DataPoint]) -> Result<TrendAnalysis> {
        let values = checked_values(points)?;
        trend::log_irregular_spacing(points);
        Ok(trend::analyze(&values, &self.thresholds))
    }

    #[instrument(skip(self, points), fields(n = points.len()))]
    pub fn analyze_seasonality(&self, points: &[DataPoint]) -> Result<SeasonalityAnalysis> {
        let values = checked_values(points)?;
        Ok(seasonality::analyze(&values, &self.thresholds))
    }

    /// Mean-shift change points, in chronological order
    pub fn detect_change_points(&self, points: &[DataPoint]) -> Result<Vec<ChangePoint>> {
        checked_values(points)?;
        let mut ordered = points.to_vec();
        ordered.sort_by_key(|p| p.timestamp);
        Ok(trend::change_points(&ordered, &self.thresholds))
    }
}

/// Chronological values, rejecting empty input and missing or infinite values
fn checked_values(points: &[DataPoint]) -> Result<Vec<f64>> {
    if points.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "at least one data point is required".to_string(),
        ));
    }
    let values = chronological_values(points);
    ensure_finite(&values)?;
    Ok(values)
}

pub(crate) fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::InvalidInput(format!(
            "value at position {index} is missing or not finite"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use series_insights_types::{NormalityMethod, TrendDirection};

    fn points(values: &[f64]) -> Vec<DataPoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(start + Duration::days(i as i64), *v))
            .collect()
    }

    #[test]
    fn test_new_rejects_invalid_thresholds() {
        let thresholds = AnalyzerThresholds {
            iqr_multiplier: -1.0,
            ..Default::default()
        };
        assert!(StatisticalAnalyzer::new(thresholds).is_err());
    }

    #[test]
    fn test_summary_rejects_empty_input() {
        let analyzer = StatisticalAnalyzer::default();
        assert!(matches!(
            analyzer.generate_summary(&[], false),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_summary_rejects_missing_values() {
        let mut data = points(&[1.0, 2.0, 3.0]);
        data.push(DataPoint::missing(data[2].timestamp + Duration::days(1)));

        let analyzer = StatisticalAnalyzer::default();
        assert!(matches!(
            analyzer.generate_summary(&data, false),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_summary_outliers_only_on_request() {
        let data = points(&[10.0, 12.0, 11.0, 13.0, 12.0, 100.0]);
        let analyzer = StatisticalAnalyzer::default();

        let without = analyzer.generate_summary(&data, false).unwrap();
        assert!(without.outliers.is_none());

        let with = analyzer.generate_summary(&data, true).unwrap();
        let outliers = with.outliers.unwrap();
        assert_eq!(outliers.method, OutlierMethod::Iqr);
        assert_eq!(outliers.indices, vec![5]);
    }

    #[test]
    fn test_out_of_order_points_are_sorted_for_trend() {
        let mut data = points(&(0..20).map(f64::from).collect::<Vec<_>>());
        data.reverse();

        let analysis = StatisticalAnalyzer::default().analyze_trend(&data).unwrap();
        assert_eq!(analysis.direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_jarque_bera_method_is_used_when_configured() {
        let thresholds = AnalyzerThresholds {
            normality_method: NormalityMethod::JarqueBera,
            ..Default::default()
        };
        let analyzer = StatisticalAnalyzer::new(thresholds).unwrap();
        let values: Vec<f64> = (0..30).map(|i| f64::from(i % 7)).collect();
        let summary = analyzer.generate_summary(&points(&values), false).unwrap();

        let expected = crate::distribution::jarque_bera(&values, 0.05);
        assert_eq!(summary.distribution.normality, expected);
    }

    #[test]
    fn test_detect_outliers_rejects_bad_threshold() {
        let analyzer = StatisticalAnalyzer::default();
        assert!(matches!(
            analyzer.detect_outliers(&[1.0, 2.0], OutlierMethod::Zscore, 0.0),
            Err(AnalysisError::InvalidParameter(_))
        ));
        assert!(matches!(
            analyzer.detect_outliers(&[1.0, f64::NAN], OutlierMethod::Iqr, 3.0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_change_points_accept_unsorted_points() {
        let mut values = vec![10.0; 20];
        values.extend(vec![40.0; 20]);
        let mut data = points(&values);
        data.reverse();

        let found = StatisticalAnalyzer::default().detect_change_points(&data).unwrap();
        assert!(found.iter().any(|cp| cp.index == 20 && cp.shift > 0.0));
    }
}

//! Outlier detection and severity assessment

use series_insights_types::thresholds::{DIVISION_FLOOR, MAD_SCALE};
use series_insights_types::{
    AnalysisError, AnalyzerThresholds, AssessedOutlier, OutlierAssessment, OutlierMethod,
    OutlierResult, OutlierSeverity, OutlierThresholds, Result, SeverityBreakdown,
};
use tracing::debug;

use crate::numeric::{mean, median, percentile, population_std_dev, sorted};

/// Flag outliers in `values` with the given method.
///
/// Indices refer to positions in `values`. An empty slice yields an empty
/// result.
pub fn detect(
    values: &[f64],
    method: OutlierMethod,
    z_threshold: f64,
    thresholds: &AnalyzerThresholds,
) -> OutlierResult {
    if values.is_empty() {
        return OutlierResult::empty(method);
    }

    let bounds = Bounds::for_method(values, method, z_threshold, thresholds);
    let (indices, flagged): (Vec<usize>, Vec<f64>) = values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| bounds.flags(v))
        .map(|(i, &v)| (i, v))
        .unzip();

    debug!(method = %method, flagged = indices.len(), "outliers detected");

    OutlierResult {
        method,
        indices,
        values: flagged,
        thresholds: match method {
            OutlierMethod::Iqr => Some(OutlierThresholds {
                lower: bounds.lower,
                upper: bounds.upper,
            }),
            _ => None,
        },
        zscore_threshold: match method {
            OutlierMethod::Zscore => Some(z_threshold),
            _ => None,
        },
    }
}

/// Grade each flagged point of `result` by how far it sits from the data.
pub fn assess(
    values: &[f64],
    result: &OutlierResult,
    thresholds: &AnalyzerThresholds,
) -> Result<OutlierAssessment> {
    if let Some(&index) = result.indices.iter().find(|&&i| i >= values.len()) {
        return Err(AnalysisError::InvalidInput(format!(
            "outlier index {index} out of range for {} values",
            values.len()
        )));
    }

    let z_threshold = result.zscore_threshold.unwrap_or(thresholds.zscore_threshold);
    let bounds = match (result.method, result.thresholds) {
        (OutlierMethod::Iqr, Some(fences)) => {
            let iqr = (fences.upper - fences.lower) / (1.0 + 2.0 * thresholds.iqr_multiplier);
            Bounds {
                lower: fences.lower,
                upper: fences.upper,
                scale: iqr.max(DIVISION_FLOOR),
                mad_center: None,
            }
        }
        _ if values.is_empty() => Bounds::default(),
        (method, _) => Bounds::for_method(values, method, z_threshold, thresholds),
    };

    let m = mean(values);
    let std_dev = population_std_dev(values);

    let mut breakdown = SeverityBreakdown::default();
    let outliers: Vec<AssessedOutlier> = result
        .indices
        .iter()
        .map(|&index| {
            let value = values[index];
            let z_score = if std_dev > 0.0 { (value - m) / std_dev } else { 0.0 };
            let distance = bounds.distance_beyond(value);
            let severity = severity(z_score, distance / bounds.scale);
            breakdown.record(severity);

            AssessedOutlier {
                index,
                value,
                z_score,
                distance_from_threshold: distance,
                severity,
            }
        })
        .collect();

    let outlier_percentage = if values.is_empty() {
        0.0
    } else {
        outliers.len() as f64 / values.len() as f64 * 100.0
    };

    Ok(OutlierAssessment {
        method: result.method,
        total_points: values.len(),
        outlier_percentage,
        outliers,
        severity_breakdown: breakdown,
    })
}

/// Severity from the z-score and the scale-normalized distance past the bound
fn severity(z_score: f64, normalized_distance: f64) -> OutlierSeverity {
    let z = z_score.abs();
    if z > 4.0 || normalized_distance > 3.0 {
        OutlierSeverity::Critical
    } else if z > 3.0 || normalized_distance > 2.0 {
        OutlierSeverity::High
    } else if z > 2.0 || normalized_distance > 1.0 {
        OutlierSeverity::Medium
    } else {
        OutlierSeverity::Low
    }
}

/// Acceptance band of one detection method, in value units
#[derive(Debug, Clone, Copy)]
struct Bounds {
    lower: f64,
    upper: f64,
    /// Spread the method measures distance in
    scale: f64,
    /// Median and MAD when flagging by modified z-score
    mad_center: Option<(f64, f64, f64)>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            scale: 1.0,
            mad_center: None,
        }
    }
}

impl Bounds {
    fn for_method(
        values: &[f64],
        method: OutlierMethod,
        z_threshold: f64,
        thresholds: &AnalyzerThresholds,
    ) -> Self {
        match method {
            OutlierMethod::Iqr => {
                let data = sorted(values);
                let q1 = percentile(&data, 25.0);
                let q3 = percentile(&data, 75.0);
                let iqr = q3 - q1;
                Self {
                    lower: q1 - thresholds.iqr_multiplier * iqr,
                    upper: q3 + thresholds.iqr_multiplier * iqr,
                    scale: iqr.max(DIVISION_FLOOR),
                    mad_center: None,
                }
            }
            OutlierMethod::Mad => {
                let med = median(values);
                let deviations: Vec<f64> = values.iter().map(|v| (v - med).abs()).collect();
                let mut mad = median(&deviations);
                if mad == 0.0 {
                    mad = DIVISION_FLOOR;
                }
                let reach = thresholds.mad_cutoff * mad / MAD_SCALE;
                Self {
                    lower: med - reach,
                    upper: med + reach,
                    scale: mad / MAD_SCALE,
                    mad_center: Some((med, mad, thresholds.mad_cutoff)),
                }
            }
            OutlierMethod::Zscore => {
                let m = mean(values);
                let std_dev = population_std_dev(values).max(DIVISION_FLOOR);
                Self {
                    lower: m - z_threshold * std_dev,
                    upper: m + z_threshold * std_dev,
                    scale: std_dev,
                    mad_center: None,
                }
            }
        }
    }

    fn flags(&self, value: f64) -> bool {
        match self.mad_center {
            Some((med, mad, cutoff)) => (MAD_SCALE * (value - med) / mad).abs() > cutoff,
            None => value < self.lower || value > self.upper,
        }
    }

    fn distance_beyond(&self, value: f64) -> f64 {
        if value > self.upper {
            value - self.upper
        } else if value < self.lower {
            self.lower - value
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> AnalyzerThresholds {
        AnalyzerThresholds::default()
    }

    #[test]
    fn test_iqr_flags_spike() {
        let result = detect(&[10.0, 12.0, 11.0, 13.0, 12.0, 100.0], OutlierMethod::Iqr, 3.0, &defaults());

        assert_eq!(result.indices, vec![5]);
        assert_eq!(result.values, vec![100.0]);
        let fences = result.thresholds.unwrap();
        assert!(fences.upper < 100.0);
        assert!(result.zscore_threshold.is_none());
    }

    #[test]
    fn test_zscore_constant_series_has_no_outliers() {
        let result = detect(&[5.0; 5], OutlierMethod::Zscore, 3.0, &defaults());
        assert!(result.is_empty());
        assert_eq!(result.zscore_threshold, Some(3.0));
    }

    #[test]
    fn test_mad_constant_series_has_no_outliers() {
        let result = detect(&[5.0; 8], OutlierMethod::Mad, 3.0, &defaults());
        assert!(result.is_empty());
        assert!(result.thresholds.is_none());
    }

    #[test]
    fn test_mad_flags_spike_amid_ties() {
        // MAD is 0, so any deviation from the median is flagged
        let result = detect(&[5.0, 5.0, 5.0, 5.0, 9.0], OutlierMethod::Mad, 3.0, &defaults());
        assert_eq!(result.indices, vec![4]);
    }

    #[test]
    fn test_zscore_flags_extreme_value() {
        let mut values = vec![10.0; 20];
        values.push(100.0);
        let result = detect(&values, OutlierMethod::Zscore, 3.0, &defaults());
        assert_eq!(result.indices, vec![20]);
    }

    #[test]
    fn test_empty_input() {
        let result = detect(&[], OutlierMethod::Mad, 3.0, &defaults());
        assert_eq!(result, OutlierResult::empty(OutlierMethod::Mad));
    }

    #[test]
    fn test_severity_grades() {
        assert_eq!(severity(4.5, 0.0), OutlierSeverity::Critical);
        assert_eq!(severity(0.0, 3.5), OutlierSeverity::Critical);
        assert_eq!(severity(-3.5, 0.0), OutlierSeverity::High);
        assert_eq!(severity(2.5, 0.5), OutlierSeverity::Medium);
        assert_eq!(severity(1.0, 0.5), OutlierSeverity::Low);
    }

    #[test]
    fn test_assess_iqr_spike() {
        let values = [10.0, 12.0, 11.0, 13.0, 12.0, 100.0];
        let result = detect(&values, OutlierMethod::Iqr, 3.0, &defaults());
        let assessment = assess(&values, &result, &defaults()).unwrap();

        assert_eq!(assessment.total_points, 6);
        assert_eq!(assessment.outliers.len(), 1);
        let spike = assessment.outliers[0];
        assert_eq!(spike.index, 5);
        assert!(spike.distance_from_threshold > 0.0);
        assert_eq!(spike.severity, OutlierSeverity::Critical);
        assert_eq!(assessment.severity_breakdown.critical, 1);
        assert_eq!(assessment.severity_breakdown.total(), 1);
    }

    #[test]
    fn test_assess_percentage() {
        let mut values = vec![10.0; 19];
        values.push(1000.0);
        let result = detect(&values, OutlierMethod::Zscore, 3.0, &defaults());
        let assessment = assess(&values, &result, &defaults()).unwrap();
        assert_eq!(assessment.outlier_percentage, 5.0);
    }

    #[test]
    fn test_assess_rejects_foreign_indices() {
        let result = OutlierResult {
            indices: vec![10],
            values: vec![1.0],
            ..OutlierResult::empty(OutlierMethod::Iqr)
        };
        assert!(matches!(
            assess(&[1.0, 2.0], &result, &defaults()),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}

//! Seasonality detection and decomposition

use series_insights_types::{
    AnalysisError, AnalyzerThresholds, Decomposition, Result, SeasonalPeriod, SeasonalityAnalysis,
};
use tracing::debug;

use crate::numeric::{autocorrelation, correlation, mean};

/// Search the candidate periods for autocorrelation peaks.
///
/// A period is only tested when shorter than half the series and only kept
/// when its lag autocorrelation clears the ACF floor.
pub fn analyze(values: &[f64], thresholds: &AnalyzerThresholds) -> SeasonalityAnalysis {
    let n = values.len();

    let mut periods: Vec<SeasonalPeriod> = thresholds
        .candidate_periods
        .iter()
        .copied()
        .filter(|&period| period > 0 && (period as f64) < n as f64 / 2.0)
        .filter_map(|period| {
            let strength = autocorrelation(values, period);
            (strength > thresholds.acf_floor).then(|| SeasonalPeriod {
                period,
                strength,
                confidence: cycle_confidence(values, period),
            })
        })
        .collect();

    periods.sort_by(|a, b| b.strength.total_cmp(&a.strength));

    let top = periods.first().copied();
    let detected = top.is_some_and(|p| p.strength > thresholds.detection_threshold);
    let (strength, dominant_period) = match top {
        Some(p) if detected => (p.strength, Some(p.period)),
        _ => (0.0, None),
    };

    debug!(candidates = periods.len(), detected, ?dominant_period, "seasonality analyzed");

    SeasonalityAnalysis {
        detected,
        periods,
        strength,
        dominant_period,
    }
}

/// Average pairwise correlation between the full cycles of `period` values.
///
/// 0 when fewer than two full cycles fit. Quadratic in the number of cycles.
pub fn cycle_confidence(values: &[f64], period: usize) -> f64 {
    if period == 0 {
        return 0.0;
    }

    let cycles: Vec<&[f64]> = values.chunks_exact(period).collect();
    if cycles.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..cycles.len() {
        for j in (i + 1)..cycles.len() {
            total += correlation(cycles[i], cycles[j]);
            pairs += 1;
        }
    }

    total / pairs as f64
}

/// Additive decomposition into trend, seasonal and residual components.
pub fn decompose(values: &[f64], period: usize) -> Result<Decomposition> {
    if values.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "cannot decompose an empty series".to_string(),
        ));
    }
    if period < 2 {
        return Err(AnalysisError::InvalidParameter(format!(
            "seasonal period must be at least 2, got {period}"
        )));
    }
    if values.len() < period {
        return Err(AnalysisError::InsufficientData {
            required: period,
            actual: values.len(),
        });
    }

    let trend = moving_average(values, period / 2);

    let mut phase_sums = vec![0.0; period];
    let mut phase_counts = vec![0usize; period];
    let mut value_sums = vec![0.0; period];
    for (i, (value, level)) in values.iter().zip(&trend).enumerate() {
        phase_sums[i % period] += value - level;
        value_sums[i % period] += value;
        phase_counts[i % period] += 1;
    }

    let phase_effect: Vec<f64> = phase_sums
        .iter()
        .zip(&phase_counts)
        .map(|(sum, &count)| sum / count as f64)
        .collect();

    let overall_mean = mean(values);
    let seasonal_index: Vec<f64> = value_sums
        .iter()
        .zip(&phase_counts)
        .map(|(sum, &count)| {
            if overall_mean == 0.0 {
                1.0
            } else {
                sum / count as f64 / overall_mean
            }
        })
        .collect();

    let seasonal: Vec<f64> = (0..values.len()).map(|i| phase_effect[i % period]).collect();
    let residual: Vec<f64> = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((value, level), effect)| value - level - effect)
        .collect();

    Ok(Decomposition {
        period,
        trend,
        seasonal,
        residual,
        seasonal_index,
    })
}

/// Centered moving average, truncated at both ends
fn moving_average(values: &[f64], half_window: usize) -> Vec<f64> {
    let n = values.len();
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half_window);
            let end = (i + half_window + 1).min(n);
            mean(&values[start..end])
        })
        .collect()
}

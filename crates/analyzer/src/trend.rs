//! Trend analysis: least squares fit, Mann-Kendall test and change points

use chrono::Duration;
use series_insights_types::{
    AnalyzerThresholds, ChangePoint, DataPoint, LinearRegression, MannKendallResult,
    MannKendallTrend, TrendAnalysis, TrendDirection,
};
use tracing::debug;

use crate::numeric::{is_constant, mean, pair_sign, population_std_dev, two_tailed_p_value};

/// Analyze the trend of chronologically ordered values.
///
/// The regression runs against the sequential index, not elapsed time.
pub fn analyze(values: &[f64], thresholds: &AnalyzerThresholds) -> TrendAnalysis {
    let linear_regression = linear_regression(values);
    let mann_kendall = mann_kendall(values, thresholds.mann_kendall_alpha);

    let y_mean = mean(values);
    let slope = linear_regression.slope;
    let threshold = thresholds.trend_slope_fraction * y_mean.abs();

    // A flat series is stable even when its mean (and so the threshold) is 0
    let direction = if slope == 0.0 || slope.abs() < threshold {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let strength = slope.abs() / if y_mean == 0.0 { 1.0 } else { y_mean };
    let confidence = linear_regression.r_squared * (1.0 - mann_kendall.p_value);

    debug!(?direction, slope, strength, confidence, "trend analyzed");

    TrendAnalysis {
        direction,
        strength,
        confidence,
        linear_regression,
        mann_kendall,
    }
}

/// Ordinary least squares of value against index `0..n`.
///
/// `r_squared` is 0 for a constant series.
pub fn linear_regression(values: &[f64]) -> LinearRegression {
    let n = values.len();
    if n < 2 || is_constant(values) {
        return LinearRegression {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
            r_squared: 0.0,
        };
    }

    let y_mean = mean(values);
    let x_mean = (n - 1) as f64 / 2.0;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let ss_total: f64 = values.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_residual: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| (y - (intercept + slope * i as f64)).powi(2))
        .sum();

    let r_squared = if ss_total > 0.0 {
        1.0 - ss_residual / ss_total
    } else {
        0.0
    };

    LinearRegression {
        slope,
        intercept,
        r_squared,
    }
}

/// Mann-Kendall monotonic trend test with a normal approximation.
///
/// Compares every pair, so the cost is quadratic in the series length.
pub fn mann_kendall(values: &[f64], alpha: f64) -> MannKendallResult {
    let n = values.len();

    let mut s: i64 = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            s += pair_sign(values[i], values[j]);
        }
    }

    let nf = n as f64;
    let variance = nf * (nf - 1.0) * (2.0 * nf + 5.0) / 18.0;
    let z = if s == 0 || variance <= 0.0 {
        0.0
    } else if s > 0 {
        (s as f64 - 1.0) / variance.sqrt()
    } else {
        (s as f64 + 1.0) / variance.sqrt()
    };

    let p_value = two_tailed_p_value(z);
    let tau = if n < 2 {
        0.0
    } else {
        2.0 * s as f64 / (nf * (nf - 1.0))
    };

    let trend = if p_value < alpha && tau > 0.0 {
        MannKendallTrend::Increasing
    } else if p_value < alpha && tau < 0.0 {
        MannKendallTrend::Decreasing
    } else {
        MannKendallTrend::NoTrend
    };

    MannKendallResult {
        s,
        z,
        tau,
        p_value,
        trend,
    }
}

/// Mean-shift change points over a sliding pair of windows.
///
/// `points` must already be in chronological order.
pub fn change_points(points: &[DataPoint], thresholds: &AnalyzerThresholds) -> Vec<ChangePoint> {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let n = values.len();
    let window = thresholds.change_point_min_window.max(n / 10);

    if window == 0 || n < 2 * window + 1 {
        debug!(n, window, "series too short for change point detection");
        return Vec::new();
    }

    let std_dev = population_std_dev(&values);
    if std_dev == 0.0 {
        return Vec::new();
    }

    let standard_error = std_dev * (2.0 / window as f64).sqrt();
    let mut found = Vec::new();

    for i in window..(n - window) {
        let before = mean(&values[i - window..i]);
        let after = mean(&values[i..i + window]);
        let shift = after - before;

        if shift.abs() > thresholds.change_point_sigma * std_dev {
            let z = shift.abs() / standard_error;
            found.push(ChangePoint {
                index: i,
                timestamp: points[i].timestamp,
                shift,
                significance: 1.0 - two_tailed_p_value(z),
            });
        }
    }

    debug!(count = found.len(), window, "change points detected");
    found
}

/// Log when consecutive points are not evenly spaced.
///
/// The index-based regression assumes uniform spacing; gaps are reported but
/// not corrected.
pub(crate) fn log_irregular_spacing(points: &[DataPoint]) {
    let gaps: Vec<Duration> = points
        .windows(2)
        .map(|w| w[1].timestamp - w[0].timestamp)
        .collect();

    let Some(first) = gaps.first() else {
        return;
    };

    let irregular = gaps.iter().filter(|gap| *gap != first).count();
    if irregular > 0 {
        debug!(
            irregular,
            expected_seconds = first.num_seconds(),
            "irregular spacing between data points"
        );
    }
}

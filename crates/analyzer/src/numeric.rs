//! Numeric helpers shared by the analyses
//!
//! All functions here are total: empty input or a zero denominator yields a
//! neutral value instead of `NaN`.

use std::cmp::Ordering;

use series_insights_types::DataPoint;
use tracing::debug;

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Whether every value equals the first one; true for an empty slice.
///
/// Spread is zero exactly when this holds. Summing deviations from a float
/// mean would instead leave rounding residue for values such as 0.1.
pub fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Population variance (divides by n); 0 for an empty or constant slice
pub fn population_variance(values: &[f64]) -> f64 {
    if is_constant(values) {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Ascending copy of the values
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Linear-interpolation percentile of ascending data, `p` in 0..=100.
///
/// `index = p/100 * (n-1)`, interpolated between its floor and ceiling.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let n = sorted_data.len();
    if n == 1 {
        return sorted_data[0];
    }

    let index = (p / 100.0) * (n - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper || sorted_data[lower] == sorted_data[upper] {
        sorted_data[lower]
    } else {
        let fraction = index - lower as f64;
        sorted_data[lower] * (1.0 - fraction) + sorted_data[upper] * fraction
    }
}

/// Median of unsorted values
pub fn median(values: &[f64]) -> f64 {
    percentile(&sorted(values), 50.0)
}

/// Standard normal CDF.
///
/// Abramowitz-Stegun 26.2.17 rational polynomial, absolute error below
/// about 7.5e-8. Kept instead of an exact erf so outputs stay reproducible
/// across releases.
pub fn normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let prob =
        d * t * (0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));

    if x > 0.0 {
        1.0 - prob
    } else {
        prob
    }
}

/// Two-tailed p-value of a standard normal score
pub fn two_tailed_p_value(z: f64) -> f64 {
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Pearson correlation over the common prefix of two slices.
///
/// Returns 0 when either side has no variance.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }

    let (x, y) = (&x[..n], &y[..n]);
    if is_constant(x) || is_constant(y) {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut numerator = 0.0;
    let mut sum_x_sq = 0.0;
    let mut sum_y_sq = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        sum_x_sq += dx * dx;
        sum_y_sq += dy * dy;
    }

    let denominator = (sum_x_sq * sum_y_sq).sqrt();
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Lag autocorrelation `Σ(xₜ-x̄)(xₜ₊ₗ-x̄) / Σ(xₜ-x̄)²`.
///
/// Returns 0 for a lag outside `1..n` or a constant series.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if lag == 0 || lag >= n || is_constant(values) {
        return 0.0;
    }

    let m = mean(values);
    let numerator: f64 = values
        .iter()
        .zip(values.iter().skip(lag))
        .map(|(a, b)| (a - m) * (b - m))
        .sum();
    let denominator: f64 = values.iter().map(|x| (x - m).powi(2)).sum();

    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Sign of `b - a` as -1, 0 or 1 (ties count as 0)
pub fn pair_sign(a: f64, b: f64) -> i64 {
    match b.partial_cmp(&a) {
        Some(Ordering::Greater) => 1,
        Some(Ordering::Less) => -1,
        _ => 0,
    }
}

/// Values in chronological order.
///
/// Callers are expected to pass ordered points; out-of-order input is
/// stable-sorted by timestamp rather than trusted.
pub fn chronological_values(points: &[DataPoint]) -> Vec<f64> {
    let ordered = points
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp);

    if ordered {
        return points.iter().map(|p| p.value).collect();
    }

    debug!(points = points.len(), "re-sorting out-of-order data points");
    let mut sorted_points = points.to_vec();
    sorted_points.sort_by_key(|p| p.timestamp);
    sorted_points.iter().map(|p| p.value).collect()
}

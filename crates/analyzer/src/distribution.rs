//! Distribution shape diagnostics

use series_insights_types::{DistributionDiagnostics, NormalityMethod, NormalityTest};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::trace;

use crate::numeric::{mean, normal_cdf, population_std_dev};

/// Skewness, excess kurtosis and normality of a value slice
pub fn diagnose(
    values: &[f64],
    method: NormalityMethod,
    alpha: f64,
) -> DistributionDiagnostics {
    let m = mean(values);
    let std_dev = population_std_dev(values);

    let skewness = skewness(values, m, std_dev);
    let kurtosis = kurtosis(values, m, std_dev);
    let normality = match method {
        NormalityMethod::Heuristic => normality_heuristic(values, m, std_dev, alpha),
        NormalityMethod::JarqueBera => jarque_bera_from_moments(values.len(), skewness, kurtosis, alpha),
    };

    DistributionDiagnostics {
        skewness,
        kurtosis,
        normality,
    }
}

/// Adjusted Fisher-Pearson skewness `n/((n-1)(n-2)) · Σz³`.
///
/// 0 when `n < 3` or the values do not vary.
pub fn skewness(values: &[f64], mean: f64, std_dev: f64) -> f64 {
    let n = values.len();
    if n < 3 || std_dev == 0.0 {
        return 0.0;
    }

    let n = n as f64;
    let sum: f64 = values.iter().map(|v| ((v - mean) / std_dev).powi(3)).sum();
    n / ((n - 1.0) * (n - 2.0)) * sum
}

/// Excess kurtosis `n(n+1)/((n-1)(n-2)(n-3)) · Σz⁴ − 3(n-1)²/((n-2)(n-3))`.
///
/// 0 when `n < 4` or the values do not vary.
pub fn kurtosis(values: &[f64], mean: f64, std_dev: f64) -> f64 {
    let n = values.len();
    if n < 4 || std_dev == 0.0 {
        return 0.0;
    }

    let n = n as f64;
    let sum: f64 = values.iter().map(|v| ((v - mean) / std_dev).powi(4)).sum();
    let scaled = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0)) * sum;
    let correction = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    scaled - correction
}

/// Rough normality indicator.
///
/// Mean squared distance between the empirical rank position `(i+0.5)/n` of
/// each sorted standardized value and the normal CDF at that value, mapped to
/// `p = exp(-statistic·n·10)`. This is not Shapiro-Wilk or Anderson-Darling
/// and its p-value is not calibrated; treat it as a heuristic flag only.
pub fn normality_heuristic(values: &[f64], mean: f64, std_dev: f64, alpha: f64) -> NormalityTest {
    let n = values.len();
    if n < 3 {
        return NormalityTest::inconclusive();
    }

    let mut standardized: Vec<f64> = if std_dev == 0.0 {
        vec![0.0; n]
    } else {
        values.iter().map(|v| (v - mean) / std_dev).collect()
    };
    standardized.sort_by(|a, b| a.total_cmp(b));

    let nf = n as f64;
    let statistic = standardized
        .iter()
        .enumerate()
        .filter_map(|(i, &z)| {
            let phi = normal_cdf(z);
            (phi > 0.0 && phi < 1.0).then(|| (phi - (i as f64 + 0.5) / nf).powi(2))
        })
        .sum::<f64>()
        / nf;

    let p_value = (-statistic * nf * 10.0).exp();
    trace!(statistic, p_value, "normality heuristic");

    NormalityTest {
        statistic,
        p_value,
        is_normal: p_value > alpha,
    }
}

/// Jarque-Bera test `JB = n/6 · (S² + K²/4)` against χ²(2).
///
/// Inconclusive when `n < 4`.
pub fn jarque_bera(values: &[f64], alpha: f64) -> NormalityTest {
    let m = mean(values);
    let std_dev = population_std_dev(values);
    jarque_bera_from_moments(
        values.len(),
        skewness(values, m, std_dev),
        kurtosis(values, m, std_dev),
        alpha,
    )
}

fn jarque_bera_from_moments(n: usize, skewness: f64, kurtosis: f64, alpha: f64) -> NormalityTest {
    if n < 4 {
        return NormalityTest::inconclusive();
    }

    let statistic = n as f64 / 6.0 * (skewness.powi(2) + kurtosis.powi(2) / 4.0);
    let p_value = match ChiSquared::new(2.0) {
        Ok(chi) => (1.0 - chi.cdf(statistic)).clamp(0.0, 1.0),
        // χ²(2) survival function is exp(-x/2)
        Err(_) => (-statistic / 2.0).exp(),
    };

    NormalityTest {
        statistic,
        p_value,
        is_normal: p_value > alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn symmetric_sample() -> Vec<f64> {
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
    }

    #[test]
    fn test_symmetric_skewness_is_zero() {
        let values = symmetric_sample();
        let m = mean(&values);
        let s = population_std_dev(&values);
        assert_relative_eq!(skewness(&values, m, s), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_right_skew_is_positive() {
        let values = vec![1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 10.0];
        let m = mean(&values);
        let s = population_std_dev(&values);
        assert!(skewness(&values, m, s) > 0.0);
    }

    #[test]
    fn test_small_samples_are_neutral() {
        assert_eq!(skewness(&[1.0, 2.0], 1.5, 0.5), 0.0);
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0], 2.0, 0.8), 0.0);
    }

    #[test]
    fn test_zero_std_is_neutral() {
        let values = vec![4.0; 6];
        assert_eq!(skewness(&values, 4.0, 0.0), 0.0);
        assert_eq!(kurtosis(&values, 4.0, 0.0), 0.0);
    }

    #[test]
    fn test_heavy_tails_have_positive_excess_kurtosis() {
        let values = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0, -10.0];
        let m = mean(&values);
        let s = population_std_dev(&values);
        assert!(kurtosis(&values, m, s) > 0.0);
    }

    #[test]
    fn test_normality_small_sample_is_inconclusive() {
        let result = normality_heuristic(&[1.0, 2.0], 1.5, 0.5, 0.05);
        assert_eq!(result, NormalityTest::inconclusive());
    }

    #[test]
    fn test_normality_heuristic_statistic_is_small_for_symmetric_data() {
        let values = symmetric_sample();
        let result = normality_heuristic(&values, mean(&values), population_std_dev(&values), 0.05);

        assert!(result.statistic >= 0.0);
        assert!(result.statistic < 0.01);
        assert!(result.p_value > 0.0 && result.p_value <= 1.0);
    }

    #[test]
    fn test_normality_heuristic_flags_extreme_skew() {
        let mut values = vec![1.0; 30];
        values.extend([1000.0, 2000.0]);
        let result = normality_heuristic(&values, mean(&values), population_std_dev(&values), 0.05);
        assert!(!result.is_normal);
    }

    #[test]
    fn test_jarque_bera_small_sample() {
        assert_eq!(jarque_bera(&[1.0, 2.0, 3.0], 0.05), NormalityTest::inconclusive());
    }

    #[test]
    fn test_jarque_bera_rejects_skewed_sample() {
        let mut values = vec![1.0; 40];
        values.extend([50.0, 60.0, 70.0]);
        let result = jarque_bera(&values, 0.05);

        assert!(result.statistic > 0.0);
        assert!(!result.is_normal);
    }

    #[test]
    fn test_jarque_bera_accepts_symmetric_sample() {
        let values: Vec<f64> = (0..50).map(|i| ((i as f64) * 0.7).sin()).collect();
        let result = jarque_bera(&values, 0.05);
        assert!(result.p_value > 0.0 && result.p_value <= 1.0);
    }

    #[test]
    fn test_diagnose_uses_selected_method() {
        let values = symmetric_sample();
        let heuristic = diagnose(&values, NormalityMethod::Heuristic, 0.05);
        let jb = diagnose(&values, NormalityMethod::JarqueBera, 0.05);

        assert_eq!(heuristic.skewness, jb.skewness);
        assert_eq!(heuristic.kurtosis, jb.kurtosis);
        assert_ne!(heuristic.normality.statistic, jb.normality.statistic);
    }
}

//! Forecast validation against observed values

use series_insights_types::{
    AnalysisError, ForecastAccuracy, ForecastValidation, LjungBoxTest, PredictionInterval,
    ResidualAnalysis, Result,
};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

use crate::numeric::{mean, population_std_dev, population_variance};

const MAX_RESIDUAL_LAGS: usize = 10;
const WHITE_NOISE_ALPHA: f64 = 0.05;
const INTERVAL_CONFIDENCE: f64 = 0.95;
const INTERVAL_Z: f64 = 1.96;

/// Compare a forecast with the values that were actually observed.
pub fn validate(actual: &[f64], predicted: &[f64]) -> Result<ForecastValidation> {
    if actual.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "cannot validate an empty forecast".to_string(),
        ));
    }
    if actual.len() != predicted.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "forecast length {} does not match {} actual values",
            predicted.len(),
            actual.len()
        )));
    }

    let residuals: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| a - p).collect();
    let accuracy = accuracy(actual, &residuals);
    let residual_analysis = residual_analysis(&residuals)?;

    let spread = INTERVAL_Z * population_std_dev(&residuals);
    let prediction_intervals = predicted
        .iter()
        .map(|p| PredictionInterval {
            lower: p - spread,
            upper: p + spread,
            confidence: INTERVAL_CONFIDENCE,
        })
        .collect();

    debug!(
        n = actual.len(),
        mae = accuracy.mae,
        rmse = accuracy.rmse,
        white_noise = residual_analysis.is_white_noise,
        "forecast validated"
    );

    Ok(ForecastValidation {
        accuracy,
        residual_analysis,
        prediction_intervals,
    })
}

fn accuracy(actual: &[f64], residuals: &[f64]) -> ForecastAccuracy {
    let n = residuals.len() as f64;
    let mae = residuals.iter().map(|r| r.abs()).sum::<f64>() / n;
    let rmse = (residuals.iter().map(|r| r * r).sum::<f64>() / n).sqrt();

    let percentage_errors: Vec<f64> = actual
        .iter()
        .zip(residuals)
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, r)| (r / a).abs())
        .collect();
    let mape = (!percentage_errors.is_empty()).then(|| mean(&percentage_errors) * 100.0);

    let naive_error = if actual.len() < 2 {
        0.0
    } else {
        actual.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>() / (actual.len() - 1) as f64
    };
    let mase = (naive_error > 0.0).then(|| mae / naive_error);

    ForecastAccuracy {
        mape,
        rmse,
        mae,
        mase,
    }
}

fn residual_analysis(residuals: &[f64]) -> Result<ResidualAnalysis> {
    let n = residuals.len();
    let lags = MAX_RESIDUAL_LAGS.min(n.saturating_sub(1));
    let m = mean(residuals);
    let variance = population_variance(residuals);

    let autocorrelation: Vec<f64> = (1..=lags)
        .map(|lag| {
            if variance == 0.0 {
                return 0.0;
            }
            let sum: f64 = residuals
                .iter()
                .zip(residuals.iter().skip(lag))
                .map(|(a, b)| (a - m) * (b - m))
                .sum();
            sum / ((n - lag) as f64 * variance)
        })
        .collect();

    let ljung_box = ljung_box(n, &autocorrelation)?;

    Ok(ResidualAnalysis {
        is_white_noise: ljung_box.p_value > WHITE_NOISE_ALPHA,
        autocorrelation,
        ljung_box,
    })
}

/// Ljung-Box portmanteau test over the given residual autocorrelations
fn ljung_box(n: usize, autocorrelation: &[f64]) -> Result<LjungBoxTest> {
    let lags = autocorrelation.len();
    if lags == 0 {
        return Ok(LjungBoxTest {
            statistic: 0.0,
            lags,
            p_value: 1.0,
            is_significant: false,
        });
    }

    let nf = n as f64;
    let statistic = nf
        * (nf + 2.0)
        * autocorrelation
            .iter()
            .enumerate()
            .map(|(i, r)| r * r / (nf - (i + 1) as f64))
            .sum::<f64>();

    let chi = ChiSquared::new(lags as f64)
        .map_err(|e| AnalysisError::Statistical(format!("chi-squared({lags}): {e}")))?;
    let p_value = (1.0 - chi.cdf(statistic)).clamp(0.0, 1.0);

    Ok(LjungBoxTest {
        statistic,
        lags,
        p_value,
        is_significant: p_value <= WHITE_NOISE_ALPHA,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_forecast() {
        let actual = vec![10.0, 12.0, 14.0, 16.0];
        let result = validate(&actual, &actual).unwrap();

        assert_eq!(result.accuracy.mae, 0.0);
        assert_eq!(result.accuracy.rmse, 0.0);
        assert_eq!(result.accuracy.mape, Some(0.0));
        assert_eq!(result.accuracy.mase, Some(0.0));
        assert!(result.residual_analysis.is_white_noise);
        for interval in &result.prediction_intervals {
            assert_eq!(interval.lower, interval.upper);
        }
    }

    #[test]
    fn test_accuracy_metrics() {
        let actual = vec![100.0, 110.0, 120.0, 130.0];
        let predicted = vec![98.0, 113.0, 118.0, 133.0];
        let result = validate(&actual, &predicted).unwrap();

        assert_relative_eq!(result.accuracy.mae, 2.5);
        assert_relative_eq!(result.accuracy.rmse, (26.0_f64 / 4.0).sqrt());
        assert_relative_eq!(result.accuracy.mase.unwrap(), 0.25);
        assert!(result.accuracy.mape.unwrap() > 0.0);
    }

    #[test]
    fn test_mape_skips_zero_actuals() {
        let result = validate(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(result.accuracy.mape, None);
        assert_eq!(result.accuracy.mase, None);
    }

    #[test]
    fn test_single_value_has_no_lags() {
        let result = validate(&[5.0], &[4.0]).unwrap();
        assert!(result.residual_analysis.autocorrelation.is_empty());
        assert_eq!(result.residual_analysis.ljung_box.lags, 0);
        assert_eq!(result.accuracy.mase, None);
    }

    #[test]
    fn test_lag_count_is_capped() {
        let actual: Vec<f64> = (0..40).map(f64::from).collect();
        let predicted: Vec<f64> = actual.iter().map(|v| v + (v * 0.9).sin()).collect();
        let result = validate(&actual, &predicted).unwrap();

        assert_eq!(result.residual_analysis.autocorrelation.len(), 10);
        assert_eq!(result.residual_analysis.ljung_box.lags, 10);
        assert_eq!(result.prediction_intervals.len(), 40);
    }

    #[test]
    fn test_correlated_residuals_are_not_white_noise() {
        let actual: Vec<f64> = (0..60).map(f64::from).collect();
        // forecast lags behind with a slowly drifting error
        let predicted: Vec<f64> = actual
            .iter()
            .map(|v| v - 5.0 * (v / 20.0).sin())
            .collect();
        let result = validate(&actual, &predicted).unwrap();

        assert!(!result.residual_analysis.is_white_noise);
        assert!(result.residual_analysis.ljung_box.is_significant);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(validate(&[], &[]), Err(AnalysisError::InvalidInput(_))));
        assert!(matches!(
            validate(&[1.0, 2.0], &[1.0]),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}

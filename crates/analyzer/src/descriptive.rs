//! Descriptive statistics

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use series_insights_types::{ConfidenceInterval, DescriptiveStatistics, Quartiles, ValueRange};

use crate::numeric::{mean, percentile, population_variance, sorted};

/// Confidence levels reported for the mean, with their normal z values
const MEAN_CONFIDENCE_LEVELS: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];

/// Describe location and spread of a non-empty value slice
pub fn describe(values: &[f64]) -> DescriptiveStatistics {
    let sorted = sorted(values);
    let n = values.len();
    let mean = mean(values);
    let variance = population_variance(values);
    let standard_deviation = variance.sqrt();

    let quartiles = Quartiles {
        q1: percentile(&sorted, 25.0),
        q2: percentile(&sorted, 50.0),
        q3: percentile(&sorted, 75.0),
    };

    let range = ValueRange {
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
    };

    DescriptiveStatistics {
        mean,
        median: quartiles.q2,
        mode: mode(values),
        standard_deviation,
        variance,
        quartiles,
        range,
        confidence_intervals: mean_confidence_intervals(mean, standard_deviation, n),
    }
}

/// Values tied at the highest frequency, in first-seen order.
///
/// Empty unless the highest frequency exceeds 1.
pub fn mode(values: &[f64]) -> Vec<f64> {
    // Counts in first-seen order, located through their bit pattern
    let mut frequencies: Vec<(f64, usize)> = Vec::new();
    let mut slots: HashMap<u64, usize> = HashMap::with_capacity(values.len());

    for &value in values {
        // -0.0 and 0.0 count as the same value
        let key = if value == 0.0 { 0.0 } else { value };
        match slots.entry(key.to_bits()) {
            Entry::Occupied(slot) => frequencies[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(frequencies.len());
                frequencies.push((key, 1));
            }
        }
    }

    let max_frequency = frequencies.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max_frequency <= 1 {
        return Vec::new();
    }

    frequencies
        .into_iter()
        .filter(|(_, count)| *count == max_frequency)
        .map(|(value, _)| value)
        .collect()
}

fn mean_confidence_intervals(mean: f64, std_dev: f64, n: usize) -> Vec<ConfidenceInterval> {
    let standard_error = if n > 0 {
        std_dev / (n as f64).sqrt()
    } else {
        0.0
    };

    MEAN_CONFIDENCE_LEVELS
        .iter()
        .map(|&(level, z)| ConfidenceInterval {
            level,
            lower: mean - z * standard_error,
            upper: mean + z * standard_error,
        })
        .collect()
}

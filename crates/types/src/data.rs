//! Input observations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single timestamped business observation.
///
/// A missing value is represented as `NaN`; a JSON `null` deserializes to it
/// and serializes back to `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Observation time
    pub timestamp: DateTime<Utc>,
    /// Observed value
    #[serde(deserialize_with = "nullable_value")]
    pub value: f64,
}

impl DataPoint {
    /// Create a new data point
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Create a data point without a value
    pub fn missing(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            value: f64::NAN,
        }
    }

    /// Whether the observation carries no value
    pub fn is_missing(&self) -> bool {
        self.value.is_nan()
    }
}

fn nullable_value<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

//! Reading series from files or stdin

use crate::{CliError, CliResult};
use series_insights_types::DataPoint;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Path that selects stdin instead of a file
pub const STDIN_PATH: &str = "-";

/// Read a JSON array of `{timestamp, value}` points.
///
/// `null` values are kept as missing points.
pub fn read_points(path: &Path) -> CliResult<Vec<DataPoint>> {
    let points = parse_points(open(path)?)?;
    debug!(path = %path.display(), points = points.len(), "data points loaded");
    Ok(points)
}

/// Read a JSON array of numbers
pub fn read_values(path: &Path) -> CliResult<Vec<f64>> {
    parse_values(open(path)?)
}

pub fn parse_points<R: Read>(reader: R) -> CliResult<Vec<DataPoint>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a JSON array of numbers, or of points whose values are taken in
/// order.
pub fn parse_values<R: Read>(reader: R) -> CliResult<Vec<f64>> {
    let raw: serde_json::Value = serde_json::from_reader(reader)?;
    let items = raw
        .as_array()
        .ok_or_else(|| CliError::InvalidInput("expected a JSON array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64()
                .or_else(|| item.get("value").and_then(serde_json::Value::as_f64))
                .ok_or_else(|| CliError::InvalidInput(format!("element {i} is not a number")))
        })
        .collect()
}

/// Values of the non-missing points with their positions in the input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentValues {
    pub values: Vec<f64>,
    positions: Vec<usize>,
}

impl PresentValues {
    pub fn from_points(points: &[DataPoint]) -> Self {
        let (positions, values) = points
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_missing())
            .map(|(i, p)| (i, p.value))
            .unzip();
        Self { values, positions }
    }

    /// Rewrite indices into `values` as positions in the input
    pub fn to_input_positions(&self, indices: &mut [usize]) {
        for index in indices {
            if let Some(&position) = self.positions.get(*index) {
                *index = position;
            }
        }
    }
}

fn open(path: &Path) -> CliResult<Box<dyn Read>> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)?;
    Ok(Box::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let json = r#"[
            {"timestamp": "2024-01-01T00:00:00Z", "value": 10.5},
            {"timestamp": "2024-01-02T00:00:00Z", "value": null}
        ]"#;
        let points = parse_points(json.as_bytes()).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 10.5);
        assert!(points[1].is_missing());
        assert_eq!(PresentValues::from_points(&points).values, vec![10.5]);
    }

    #[test]
    fn test_present_values_map_back_to_input_positions() {
        let json = r#"[
            {"timestamp": "2024-01-01T00:00:00Z", "value": null},
            {"timestamp": "2024-01-02T00:00:00Z", "value": 1.0},
            {"timestamp": "2024-01-03T00:00:00Z", "value": null},
            {"timestamp": "2024-01-04T00:00:00Z", "value": 2.0},
            {"timestamp": "2024-01-05T00:00:00Z", "value": 3.0}
        ]"#;
        let present = PresentValues::from_points(&parse_points(json.as_bytes()).unwrap());
        assert_eq!(present.values, vec![1.0, 2.0, 3.0]);

        let mut indices = vec![0, 2];
        present.to_input_positions(&mut indices);
        assert_eq!(indices, vec![1, 4]);
    }

    #[test]
    fn test_parse_points_rejects_garbage() {
        assert!(matches!(parse_points("{".as_bytes()), Err(CliError::Json(_))));
    }

    #[test]
    fn test_parse_values_numbers_and_points() {
        assert_eq!(parse_values("[1, 2.5, -3]".as_bytes()).unwrap(), vec![1.0, 2.5, -3.0]);

        let json = r#"[{"timestamp": "2024-01-01T00:00:00Z", "value": 4}]"#;
        assert_eq!(parse_values(json.as_bytes()).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_parse_values_rejects_non_numbers() {
        assert!(matches!(
            parse_values(r#"[1, "two"]"#.as_bytes()),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_values("{}".as_bytes()),
            Err(CliError::InvalidInput(_))
        ));
    }
}

//! CLI command implementations

pub mod analyze;
pub mod config;
pub mod report;
pub mod validate;

pub use analyze::AnalyzeCommand;
pub use config::ConfigCommand;
pub use report::ReportCommand;
pub use validate::ValidateCommand;

use crate::input::{read_points, PresentValues};
use crate::CliResult;
use series_insights_types::DataPoint;
use std::path::Path;
use tracing::warn;

/// Points with a value, for the analyses that reject missing data
pub(crate) fn complete_points(path: &Path) -> CliResult<Vec<DataPoint>> {
    let points = read_points(path)?;
    let total = points.len();
    let complete: Vec<DataPoint> = points.into_iter().filter(|p| !p.is_missing()).collect();

    if complete.len() < total {
        warn!(
            dropped = total - complete.len(),
            "skipping data points with missing values"
        );
    }
    Ok(complete)
}

/// Non-missing values of a file, remembering where each sat in the input
pub(crate) fn present_values(path: &Path) -> CliResult<PresentValues> {
    let points = read_points(path)?;
    let present = PresentValues::from_points(&points);

    if present.values.len() < points.len() {
        warn!(
            dropped = points.len() - present.values.len(),
            "skipping data points with missing values"
        );
    }
    Ok(present)
}

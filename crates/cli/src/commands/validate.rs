//! Validate command - forecast accuracy against observations

use crate::{
    input::read_values,
    output::{emit, OutputFormat},
    CliResult,
};
use clap::Args;
use std::path::PathBuf;

/// Compare a forecast with observed values
#[derive(Args, Debug, Clone)]
pub struct ValidateCommand {
    /// JSON array of observed values (numbers or points)
    #[arg(long, value_name = "FILE")]
    pub actual: PathBuf,

    /// JSON array of forecast values, same length as the observations
    #[arg(long, value_name = "FILE")]
    pub predicted: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, format: OutputFormat) -> CliResult<()> {
        let actual = read_values(&self.actual)?;
        let predicted = read_values(&self.predicted)?;
        let validation = analyzer::validate_forecast(&actual, &predicted)?;
        emit(format, "Forecast validation", &validation)
    }
}

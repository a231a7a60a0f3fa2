//! Analyze command - statistical analyses of one series

use super::{complete_points, present_values};
use crate::{
    output::{emit, OutputFormat},
    CliError, CliResult, Engine,
};
use clap::Subcommand;
use series_insights_types::OutlierMethod;
use std::path::PathBuf;

/// Analyze command variants
#[derive(Subcommand, Debug, Clone)]
pub enum AnalyzeCommand {
    /// Full statistical summary
    #[command(name = "summary", about = "Descriptive, distribution, trend and seasonality summary")]
    Summary {
        /// JSON file of data points, or - for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Attach IQR outliers to the summary
        #[arg(long)]
        include_outliers: bool,
    },

    /// Trend analysis with regression and Mann-Kendall detail
    #[command(name = "trend", about = "Trend direction, regression and Mann-Kendall test")]
    Trend {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Seasonality search
    #[command(name = "seasonality", about = "Detect periodic patterns")]
    Seasonality {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Outlier detection
    #[command(name = "outliers", about = "Flag outliers with iqr, mad or zscore")]
    Outliers {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Detection method (iqr, mad, zscore)
        #[arg(long, short, default_value = "iqr")]
        method: String,

        /// Cutoff for the zscore method (defaults to the configured threshold)
        #[arg(long, value_name = "Z")]
        z_threshold: Option<f64>,

        /// Grade each outlier by severity
        #[arg(long)]
        assess: bool,
    },

    /// Mean-shift change points
    #[command(name = "change-points", about = "Detect level shifts")]
    ChangePoints {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Seasonal decomposition
    #[command(name = "decompose", about = "Split the series into trend, seasonal and residual parts")]
    Decompose {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Seasonal period (defaults to the dominant detected period)
        #[arg(long, short)]
        period: Option<usize>,
    },
}

impl AnalyzeCommand {
    /// Execute the analyze command
    pub fn execute(&self, engine: &Engine, format: OutputFormat) -> CliResult<()> {
        let stats = &engine.analyzer;

        match self {
            AnalyzeCommand::Summary {
                input,
                include_outliers,
            } => {
                let points = complete_points(input)?;
                let summary = stats.generate_summary(&points, *include_outliers)?;
                emit(format, "Statistical summary", &summary)
            }
            AnalyzeCommand::Trend { input } => {
                let trend = stats.analyze_trend(&complete_points(input)?)?;
                emit(format, "Trend analysis", &trend)
            }
            AnalyzeCommand::Seasonality { input } => {
                let seasonality = stats.analyze_seasonality(&complete_points(input)?)?;
                emit(format, "Seasonality", &seasonality)
            }
            AnalyzeCommand::Outliers {
                input,
                method,
                z_threshold,
                assess,
            } => {
                let method: OutlierMethod = method.parse()?;
                let present = present_values(input)?;
                let z = z_threshold.unwrap_or(stats.thresholds().zscore_threshold);
                let mut result = stats.detect_outliers(&present.values, method, z)?;

                // Report indices as positions in the input file
                if *assess {
                    let mut assessment = stats.assess_outliers(&present.values, &result)?;
                    for outlier in &mut assessment.outliers {
                        present.to_input_positions(std::slice::from_mut(&mut outlier.index));
                    }
                    emit(format, "Outlier assessment", &assessment)
                } else {
                    present.to_input_positions(&mut result.indices);
                    emit(format, "Outliers", &result)
                }
            }
            AnalyzeCommand::ChangePoints { input } => {
                let change_points = stats.detect_change_points(&complete_points(input)?)?;
                emit(format, "Change points", &change_points)
            }
            AnalyzeCommand::Decompose { input, period } => {
                let points = complete_points(input)?;
                let period = match period {
                    Some(period) => *period,
                    None => stats
                        .analyze_seasonality(&points)?
                        .dominant_period
                        .ok_or_else(|| {
                            CliError::InvalidInput(
                                "no seasonality detected; pass --period".to_string(),
                            )
                        })?,
                };

                let mut ordered = points;
                ordered.sort_by_key(|p| p.timestamp);
                let values: Vec<f64> = ordered.iter().map(|p| p.value).collect();
                let decomposition = analyzer::decompose(&values, period)?;
                emit(format, "Decomposition", &decomposition)
            }
        }
    }
}

//! Report command - data quality and business insights

use super::complete_points;
use crate::{
    input::read_points,
    output::{emit, OutputFormat},
    CliResult, Engine,
};
use clap::Subcommand;
use serde::Serialize;
use series_insights_types::{DataQualityReport, ForecastInsights, StatisticalSummary};
use std::path::PathBuf;

/// Report command variants
#[derive(Subcommand, Debug, Clone)]
pub enum ReportCommand {
    /// Data quality score
    #[command(name = "quality", about = "Score completeness and sufficiency of the data")]
    Quality {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Forecast insights
    #[command(name = "insights", about = "Opportunities, risks and recommendations")]
    Insights {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Quality, summary and insights together
    #[command(name = "full", about = "Quality report, statistical summary and insights")]
    Full {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

/// Everything known about one series
#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub quality: DataQualityReport,
    pub summary: StatisticalSummary,
    pub insights: ForecastInsights,
}

impl ReportCommand {
    /// Execute the report command
    pub fn execute(&self, engine: &Engine, format: OutputFormat) -> CliResult<()> {
        match self {
            ReportCommand::Quality { input } => {
                let report = engine
                    .insights
                    .generate_data_quality_report(&read_points(input)?);
                emit(format, "Data quality", &report)
            }
            ReportCommand::Insights { input } => {
                let summary = engine
                    .analyzer
                    .generate_summary(&complete_points(input)?, false)?;
                let insights = engine.insights.generate_forecast_insights(&summary);
                emit(format, "Forecast insights", &insights)
            }
            ReportCommand::Full { input } => {
                let points = read_points(input)?;
                let quality = engine.insights.generate_data_quality_report(&points);

                let complete: Vec<_> = points.into_iter().filter(|p| !p.is_missing()).collect();
                let summary = engine.analyzer.generate_summary(&complete, true)?;
                let insights = engine.insights.generate_forecast_insights(&summary);

                let report = FullReport {
                    quality,
                    summary,
                    insights,
                };
                emit(format, "Series report", &report)
            }
        }
    }
}

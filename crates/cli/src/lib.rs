//! Series insights CLI library
//!
//! Reads data points as JSON, runs the analyzer or the insights generator and
//! writes the result to stdout.

pub mod commands;
pub mod input;
pub mod output;

use analyzer::StatisticalAnalyzer;
use insights::InsightsGenerator;
use series_insights_config::{ConfigError, EngineConfig};
use series_insights_types::AnalysisError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Analyzer and generator built from one configuration
#[derive(Debug, Clone)]
pub struct Engine {
    pub config: EngineConfig,
    pub analyzer: StatisticalAnalyzer,
    pub insights: InsightsGenerator,
}

impl Engine {
    pub fn new(config: EngineConfig) -> CliResult<Self> {
        let analyzer = StatisticalAnalyzer::new(config.analyzer.clone())?;
        let insights = InsightsGenerator::new(config.insights.clone())?;
        Ok(Self {
            config,
            analyzer,
            insights,
        })
    }
}

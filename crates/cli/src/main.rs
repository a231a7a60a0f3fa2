//! Series Insights CLI
//!
//! Command-line host for the statistical analyzer and the insights generator.

use clap::{Parser, Subcommand};
use colored::Colorize;
use series_insights_cli::{
    commands::{AnalyzeCommand, ConfigCommand, ReportCommand, ValidateCommand},
    output::OutputFormat,
    CliResult, Engine,
};
use series_insights_config::{EngineConfig, ObservabilityConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "series-insights",
    version,
    about = "Statistical characterization and business insights for time series",
    long_about = "Reads time-series data points as JSON and reports on them.\n\n\
                  Features:\n\
                  - Descriptive statistics and distribution diagnostics\n\
                  - Trend, seasonality and change-point analysis\n\
                  - Outlier detection with severity grading\n\
                  - Data quality scores and forecast insights"
)]
struct Cli {
    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value = "json",
        help = "Output format (json, pretty)"
    )]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    verbose: bool,

    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "SERIES_INSIGHTS_CONFIG",
        help = "Path to a YAML configuration file"
    )]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Statistical analyses
    #[command(name = "analyze", about = "Run statistical analyses on a series")]
    Analyze {
        #[command(subcommand)]
        command: AnalyzeCommand,
    },

    /// Business reports
    #[command(name = "report", about = "Generate data quality and insight reports")]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },

    /// Forecast validation
    #[command(name = "validate", about = "Validate a forecast against observed values")]
    Validate(ValidateCommand),

    /// Configuration
    #[command(name = "config", about = "Inspect configuration")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.clone())?;
    init_tracing(cli.verbose, &config.observability);

    let engine = Engine::new(config)?;

    match &cli.command {
        Commands::Analyze { command } => command.execute(&engine, cli.output),
        Commands::Report { command } => command.execute(&engine, cli.output),
        Commands::Validate(command) => command.execute(cli.output),
        Commands::Config { command } => command.execute(&engine, cli.output),
    }
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool, observability: &ObservabilityConfig) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(observability.log_level.to_ascii_lowercase()))
    };

    let json = observability.json_logging;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
        }))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_outliers_command() {
        let cli = Cli::try_parse_from([
            "series-insights",
            "--output",
            "pretty",
            "analyze",
            "outliers",
            "data.json",
            "--method",
            "mad",
            "--assess",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Pretty);
        match cli.command {
            Commands::Analyze {
                command:
                    AnalyzeCommand::Outliers {
                        method, assess, z_threshold, ..
                    },
            } => {
                assert_eq!(method, "mad");
                assert!(assess);
                assert_eq!(z_threshold, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_validate_requires_both_files() {
        assert!(Cli::try_parse_from(["series-insights", "validate", "--actual", "a.json"]).is_err());
        assert!(Cli::try_parse_from([
            "series-insights",
            "validate",
            "--actual",
            "a.json",
            "--predicted",
            "p.json"
        ])
        .is_ok());
    }

    #[test]
    fn test_output_defaults_to_json() {
        let cli = Cli::try_parse_from(["series-insights", "report", "quality", "-"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
    }
}

//! Config command - inspect the effective configuration

use crate::{
    output::{emit, OutputFormat},
    CliResult, Engine,
};
use clap::Subcommand;

/// Config command variants
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the merged configuration
    #[command(name = "show", about = "Show the effective configuration")]
    Show,
}

impl ConfigCommand {
    pub fn execute(&self, engine: &Engine, format: OutputFormat) -> CliResult<()> {
        match self {
            ConfigCommand::Show => emit(format, "Configuration", &engine.config),
        }
    }
}

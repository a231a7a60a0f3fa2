//! Output formatting

use crate::CliResult;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on a single line
    #[default]
    Json,
    /// Indented JSON under a heading
    Pretty,
}

/// Write `value` to `out` in the requested format
pub fn write_to<W: Write, T: Serialize>(
    out: &mut W,
    format: OutputFormat,
    title: &str,
    value: &T,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputFormat::Pretty => {
            writeln!(out, "{}", title.bold().cyan())?;
            writeln!(out, "{}", "=".repeat(title.len()))?;
            writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
        }
    }
    Ok(())
}

/// Write `value` to stdout
pub fn emit<T: Serialize>(format: OutputFormat, title: &str, value: &T) -> CliResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_to(&mut out, format, title, value)
}

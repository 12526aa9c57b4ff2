//! Output formatting for CLI

use crate::error::CliResult;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print a serializable value as JSON or YAML. Returns `false` for table
/// output so the caller renders its own layout.
pub fn print_structured<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<bool> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
            Ok(true)
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(data)?);
            Ok(true)
        }
        OutputFormat::Table => Ok(false),
    }
}

/// Print a table heading
pub fn print_heading(title: &str) {
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(50));
}

/// Print an aligned `label: value` row
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<12} {}", format!("{}:", label).dimmed(), value);
}

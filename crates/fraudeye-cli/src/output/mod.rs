//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use fraudeye::RiskLevel;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Print `value` in a machine-readable format.
///
/// Returns `false` for [`OutputFormat::Pretty`], which callers render themselves.
/// CSV writes a header plus one row, so `value` must serialize as a flat record.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T) -> Result<bool> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.serialize(value)?;
            writer.flush()?;
        }
        OutputFormat::Pretty => return Ok(false),
    }
    Ok(true)
}

/// Risk level colored by severity
pub fn risk_label(level: RiskLevel) -> ColoredString {
    let text = level.as_str().to_uppercase();
    match level {
        RiskLevel::Low => text.green().bold(),
        RiskLevel::Medium => text.yellow().bold(),
        RiskLevel::High => text.red().bold(),
    }
}

/// Yes/no flag, red when set
pub fn flag(value: bool) -> ColoredString {
    if value {
        "yes".red()
    } else {
        "no".green()
    }
}

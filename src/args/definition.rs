//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

use crate::report::ReportFormat;

/// transcheck - grade translation files against a base language file
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "transcheck")]
#[command(version)]
#[command(about = "Grade JSON translation files against a base language: completion, missing keys and broken {{placeholders}}", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Directory holding the language files (default: `locales_dir` from the config, else the base file's directory)
    pub dir: Option<PathBuf>,

    /// Base (reference) language file every other file is compared against
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Fail when a file's completion is below this percentage
    #[arg(long, value_parser = parse_percentage)]
    pub min_completion: Option<f64>,

    /// Fail when any placeholder violation is found
    #[arg(long)]
    pub fail_on_violations: bool,

    /// Record files that cannot be parsed and continue with the others
    #[arg(short, long)]
    pub keep_going: bool,

    /// List every missing key in the text report
    #[arg(long)]
    pub show_missing: bool,

    /// Only compare files with this extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Configuration file (default: ./transcheck.conf when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Accept a number between 0 and 100.
fn parse_percentage(value: &str) -> Result<f64, String> {
    let pct: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=100.0).contains(&pct) {
        Ok(pct)
    } else {
        Err(format!("{pct} is not between 0 and 100"))
    }
}

//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reqlog - Django request log analyzer
///
/// Counts `django.request` records per handler and level across one or
/// more log files, scanning the files in parallel, and prints a table.
///
/// Examples:
///   reqlog app1.log app2.log
///   reqlog logs/*.log --report handlers --output report.txt
///   reqlog app.log --format json
///   reqlog --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Log files to analyze
    #[arg(
        value_name = "LOG_FILES",
        num_args = 1..,
        required_unless_present = "init_config"
    )]
    pub log_files: Vec<PathBuf>,

    /// Report kind to generate
    #[arg(short, long, value_name = "KIND")]
    pub report: Option<ReportKind>,

    /// Also save the rendered report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Omit the "Total requests" line above the table
    #[arg(long)]
    pub no_total_requests: bool,

    /// Maximum number of files scanned in parallel
    ///
    /// Defaults to the config value, or the number of available CPUs.
    #[arg(long, value_name = "NUM", env = "REQLOG_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .reqlog.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .reqlog.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Kind of report to build from the logs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Record counts per request handler and level
    #[default]
    #[value(alias = "handler")]
    #[serde(alias = "handler")]
    Handlers,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width text table (default)
    #[default]
    Table,
    /// JSON document
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.concurrency == Some(0) {
            return Err("Concurrency must be at least 1".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::{Path, PathBuf};

/// Madurómetro - digital maturity survey scoring and reporting
///
/// Scores a completed maturity survey, renders the results report and
/// asks the narrative service for the written analysis.
///
/// Examples:
///   madurometro --answers encuesta.json
///   madurometro --answers encuesta.json --format json --output resultados.json
///   madurometro --answers encuesta.json --offline
///   madurometro --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the answers JSON file
    ///
    /// A flat map of question id to Likert score (1-5), plus optional
    /// Nombre and Empresa text entries. Not required with --init-config.
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "init_config"
    )]
    pub answers: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting, or reporte-madurez.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Narrative service base URL
    #[arg(
        long,
        default_value = "http://localhost:3000",
        env = "MADUROMETRO_SERVICE_URL"
    )]
    pub service_url: String,

    /// Request timeout in seconds
    ///
    /// Unset by default: narrative generation can take minutes.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Id the survey was persisted under
    ///
    /// When set, the report carries a confirmation line with the short id.
    #[arg(long, value_name = "ID")]
    pub survey_id: Option<String>,

    /// Skip the narrative request and render scores only
    #[arg(long)]
    pub offline: bool,

    /// Also write the document-renderer JSON to this path
    #[arg(long, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .madurometro.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .madurometro.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the answers path; empty when not set (validated first).
    pub fn answers_path(&self) -> &Path {
        self.answers.as_deref().unwrap_or(Path::new(""))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.answers.is_none() {
            return Err("An answers file is required (--answers)".to_string());
        }

        // Validate service URL format (not needed for offline runs)
        if !self.offline
            && !self.service_url.starts_with("http://")
            && !self.service_url.starts_with("https://")
        {
            return Err("Service URL must start with 'http://' or 'https://'".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
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

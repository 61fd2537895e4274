//! Command-line interface for assetval.
//!
//! Provides commands for validating asset directories and inspecting the
//! resolved configuration.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::warn;

use crate::config::{self, ResolvedConfig};
use crate::core::{discover_assets, validate_all, AssetValidator, DiscoveryError};
use crate::domain::{BatchReport, Summary};

/// assetval - validate media and data asset directories
#[derive(Parser, Debug)]
#[command(name = "assetval")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: nearest .assetval/config.yaml)
    #[arg(long, global = true, env = "ASSETVAL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single asset or a tree of assets
    Validate(ValidateArgs),

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to an asset directory or a directory of assets
    #[arg(short, long)]
    pub path: PathBuf,

    /// Validate every directory below PATH that contains a metadata.json
    #[arg(short, long)]
    pub recursive: bool,

    /// Treat warnings as errors when computing the exit code
    #[arg(long, env = "ASSETVAL_STRICT")]
    pub strict: bool,

    /// Attempt to fix common issues (not supported; reported and ignored)
    #[arg(long)]
    pub fix: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable findings and summary
    Text,

    /// Machine-readable JSON report
    Json,
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub async fn execute(self) -> Result<i32> {
        self.execute_with(&mut io::stdout(), &mut io::stderr()).await
    }

    /// Execute the CLI command with report output sent to `out` and `err`
    pub async fn execute_with(self, out: &mut impl Write, err: &mut impl Write) -> Result<i32> {
        let config = config::load_config(self.config.as_deref())?;

        match self.command {
            Commands::Validate(args) => validate(&config, &args, out, err).await,
            Commands::Config => show_config(&config, out),
        }
    }
}

/// Validate assets and print the report
async fn validate(
    config: &ResolvedConfig,
    args: &ValidateArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<i32> {
    if args.fix {
        warn!("--fix is not supported; assets will only be checked");
    }

    let assets = match discover_assets(&args.path, args.recursive) {
        Ok(assets) => assets,
        Err(e @ DiscoveryError::NotFound(_)) => {
            writeln!(err, "Error: {}", e)?;
            return Ok(1);
        }
        Err(e) => return Err(e).context("Failed to discover assets"),
    };

    let validator = Arc::new(AssetValidator::new(config.validation.clone()));
    let report = validate_all(validator, assets, config.max_parallel).await;

    match args.format {
        OutputFormat::Text => {
            write_text_report(out, err, &report, args.strict).context("Failed to write report")?;
        }
        OutputFormat::Json => {
            let json = JsonReport {
                summary: report.summary(args.strict),
                report: &report,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }

    Ok(report.exit_code(args.strict))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    #[serde(flatten)]
    report: &'a BatchReport,
}

/// Write findings per asset followed by a summary block.
///
/// Errors go to `err`, everything else to `out`.
pub fn write_text_report(
    out: &mut impl Write,
    err: &mut impl Write,
    report: &BatchReport,
    strict: bool,
) -> io::Result<()> {
    for asset in report.assets.iter().filter(|a| a.has_findings()) {
        writeln!(out, "\n{}:", asset.path().display())?;

        for error in asset.errors() {
            writeln!(err, "  ❌ ERROR: {}", error.message)?;
        }
        for warning in asset.warnings() {
            writeln!(out, "  ⚠️  WARNING: {}", warning.message)?;
        }
    }

    let summary = report.summary(strict);
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "Validation Summary:")?;
    writeln!(out, "  Assets validated: {}", summary.assets)?;
    writeln!(out, "  Errors: {}", summary.errors)?;
    writeln!(out, "  Warnings: {}", summary.warnings)?;
    writeln!(out, "{}", "=".repeat(50))?;

    Ok(())
}

/// Show resolved configuration
fn show_config(config: &ResolvedConfig, out: &mut impl Write) -> Result<i32> {
    match &config.config_file {
        Some(path) => writeln!(out, "# Config file: {}", path.display())?,
        None => writeln!(out, "# Config file: (none, using defaults)")?,
    }
    write!(out, "{}", serde_yaml::to_string(config)?)?;
    Ok(0)
}

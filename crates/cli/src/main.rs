//! StyleZone bug report CLI - Main Entry Point
//!
//! Generates bug reports for failed UI tests and browses the reports
//! already written to the report directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stylezone_report::{ReportConfig, ReportGenerator};

mod commands;
mod output;

use commands::{generate, reports};

/// StyleZone bug report generator
#[derive(Parser)]
#[command(name = "bugreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the generated reports
    #[arg(long, env = "BUG_REPORT_DIR", global = true)]
    report_dir: Option<PathBuf>,

    /// Base URL of the application under test
    #[arg(long, env = "BASE_URL", global = true)]
    base_url: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bug report for a failed test
    Generate(generate::GenerateArgs),

    /// Show the most recent report
    Latest {
        /// Compare the timestamps recorded in the reports instead of file creation times
        #[arg(long)]
        by_timestamp: bool,
    },

    /// List all reports
    List,

    /// Show a single report
    Show {
        /// Report ID (BUG_YYYYMMDD_HHMMSS)
        id: String,
    },
}

impl Cli {
    fn report_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
                .with_env_overrides(),
            None => ReportConfig::from_env(),
        };

        if let Some(dir) = &self.report_dir {
            config.report_dir = dir.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.report_config()?;

    // Only generation creates the report directory
    match cli.command {
        Commands::Generate(args) => {
            let generator = ReportGenerator::new(config)
                .context("Failed to prepare report directory")?;
            generate::execute(args, &generator, cli.format)?
        }
        Commands::Latest { by_timestamp } => {
            reports::latest(&ReportGenerator::open(config), by_timestamp, cli.format)?
        }
        Commands::List => reports::list(&ReportGenerator::open(config), cli.format)?,
        Commands::Show { id } => reports::show(&ReportGenerator::open(config), &id, cli.format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "bugreport",
            "--report-dir",
            "target/reports",
            "--base-url",
            "http://localhost:8000",
            "list",
        ]);
        let config = cli.report_config().unwrap();
        assert_eq!(config.report_dir, PathBuf::from("target/reports"));
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_browsing_leaves_missing_directory_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("no_reports_yet");
        let missing_arg = missing.to_str().unwrap();

        for command in [&["list"][..], &["latest"][..], &["latest", "--by-timestamp"][..]] {
            let mut args = vec!["bugreport", "--report-dir", missing_arg, "--format", "json"];
            args.extend_from_slice(command);
            run(Cli::parse_from(args)).unwrap();
            assert!(!missing.exists(), "{:?} created the report directory", command);
        }
    }

    #[test]
    fn test_generate_creates_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let reports = dir.path().join("reports");
        let cli = Cli::parse_from([
            "bugreport",
            "--report-dir",
            reports.to_str().unwrap(),
            "--format",
            "json",
            "generate",
            "-t",
            "test_cart_badge",
            "-m",
            "badge count is 0",
        ]);

        run(cli).unwrap();
        assert!(reports.is_dir());
        assert_eq!(std::fs::read_dir(&reports).unwrap().count(), 3);
    }

    #[test]
    fn test_generate_requires_name_or_event() {
        assert!(Cli::try_parse_from(["bugreport", "generate", "-m", "boom"]).is_err());
        assert!(Cli::try_parse_from(["bugreport", "generate", "--event", "e.yaml"]).is_ok());
        assert!(Cli::try_parse_from(["bugreport", "generate", "-t", "test_a", "-m", "boom"]).is_ok());
    }
}

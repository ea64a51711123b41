//! Command-line interface for namemark.

use crate::config::Config;
use crate::driver::{self, RunSummary};
use crate::logging::init_logging;
use crate::report::ConsoleReporter;
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Mark duplicate record names in JSON files and report how the duplicates differ
#[derive(Parser, Debug)]
#[command(name = "namemark")]
#[command(about = "Mark duplicate record names in JSON files with descending suffixes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Directory containing the JSON documents
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report duplicates without writing marked files
    #[arg(long)]
    pub dry_run: bool,

    /// Suffix inserted before the extension of marked files
    #[arg(long)]
    pub suffix: Option<String>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config file settings with command-line overrides applied
    pub fn effective_config(&self) -> Result<Config> {
        let mut config =
            Config::load(self.config.as_deref()).context("Failed to load configuration")?;

        if self.dry_run {
            config.output.dry_run = true;
        }
        if let Some(suffix) = &self.suffix {
            config.output.suffix = suffix.clone();
        }

        config.validate().context("Invalid command-line options")?;
        Ok(config)
    }
}

/// Run the marker over the requested directory
pub fn run(cli: Cli) -> Result<RunSummary> {
    let config = cli.effective_config()?;
    init_logging(&config.logging, cli.verbose);

    if !cli.dir.is_dir() {
        bail!("Not a directory: {}", cli.dir.display());
    }

    let mut reporter = ConsoleReporter::new(cli.verbose);
    let summary = driver::run(&cli.dir, &config, &mut reporter);

    println!(
        "\nProcessed {} files: {} marked, {} clean, {} skipped",
        summary.scanned, summary.marked, summary.clean, summary.skipped
    );
    if summary.unwritten > 0 {
        println!("Dry run: {} files have duplicates, nothing written", summary.unwritten);
    }
    if summary.write_failures > 0 {
        println!("Write failures: {}", summary.write_failures);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["namemark"]);
        assert_eq!(cli.dir, PathBuf::from("."));
        assert!(!cli.dry_run);
        assert!(cli.suffix.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let cli = Cli::parse_from(["namemark", "data", "--dry-run", "--suffix", "_fixed"]);
        let config = cli.effective_config().unwrap();

        assert_eq!(cli.dir, PathBuf::from("data"));
        assert!(config.output.dry_run);
        assert_eq!(config.output.suffix, "_fixed");
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let cli = Cli::parse_from(["namemark", "--suffix", ""]);
        assert!(cli.effective_config().is_err());
    }
}

//! Command-line argument definitions for the BAPLIE processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::Direction;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Upper bound accepted for `--workers`
const MAX_WORKERS: usize = 256;

/// CLI arguments for the BAPLIE stowage plan processor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "baplie-processor",
    version,
    about = "Parse EDIFACT BAPLIE stowage plans into structured vessel voyages",
    long_about = "Reads BAPLIE 2.2.1 stowage plan messages, reconstructs every container \
                  record with its ISO 9711 slot position, weights, ports and hazard/reefer \
                  details, and groups them into a bay-by-bay model of the vessel."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse one or more BAPLIE documents and print a summary or JSON
    Parse(ParseArgs),
    /// Print the bay-by-bay stowage plan of a document
    Bays(BaysArgs),
    /// Parse every BAPLIE document under a directory and report failures
    Validate(ValidateArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/baplie-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Log level requested on the command line, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }

        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// BAPLIE documents to parse
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Output format for parsed voyages"
    )]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Write output to this file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Number of documents parsed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of documents parsed concurrently"
    )]
    pub workers: Option<usize>,

    /// Direction to stamp on every parsed voyage
    #[arg(long = "direction", value_enum, help = "Voyage direction (import or export)")]
    pub direction: Option<DirectionArg>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the bays command
#[derive(Debug, Clone, Parser)]
pub struct BaysArgs {
    /// BAPLIE document to display
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only show this bay
    #[arg(short = 'b', long = "bay", value_name = "N", help = "Only show this bay")]
    pub bay: Option<u16>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Directory scanned recursively for BAPLIE documents
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// File name pattern, replacing the configured patterns
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "GLOB",
        help = "File name pattern to match (e.g. \"*.edi\")"
    )]
    pub pattern: Option<String>,

    /// Number of documents parsed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of documents parsed concurrently"
    )]
    pub workers: Option<usize>,

    /// List every failing file, not just the counts per error kind
    #[arg(long = "detailed", help = "List every failing file")]
    pub detailed: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options for the parse command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// JSON serialization of the voyage
    Json,
}

/// Voyage direction as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Import,
    Export,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Import => Direction::Import,
            DirectionArg::Export => Direction::Export,
        }
    }
}

impl Args {
    /// Common options of the selected subcommand
    pub fn common(&self) -> Option<&CommonArgs> {
        self.command.as_ref().map(|command| match command {
            Commands::Parse(args) => &args.common,
            Commands::Bays(args) => &args.common,
            Commands::Validate(args) => &args.common,
        })
    }
}

fn validate_workers(workers: Option<usize>) -> Result<()> {
    match workers {
        Some(0) => Err(Error::configuration(
            "Number of workers must be greater than 0".to_string(),
        )),
        Some(count) if count > MAX_WORKERS => Err(Error::configuration(format!(
            "Number of workers cannot exceed {}",
            MAX_WORKERS
        ))),
        _ => Ok(()),
    }
}

impl ParseArgs {
    /// Validate the parse command arguments
    pub fn validate(&self) -> Result<()> {
        validate_workers(self.workers)?;

        for file in &self.files {
            if !file.is_file() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    file.display()
                )));
            }
        }

        Ok(())
    }
}

impl BaysArgs {
    /// Validate the bays command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }

        Ok(())
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments
    pub fn validate(&self) -> Result<()> {
        validate_workers(self.workers)?;

        if !self.directory.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.directory.display()
            )));
        }

        if let Some(pattern) = &self.pattern {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::configuration(format!("Invalid file pattern '{}': {}", pattern, e))
            })?;
        }

        Ok(())
    }
}

//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the command implementations: logging and configuration setup, document
//! discovery, and the concurrent parse driver.

use crate::app::services::baplie_parser::{BaplieParser, ParseResult};
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome counters reported by every command
#[derive(Debug, Clone, Default)]
pub struct CommandSummary {
    /// Documents parsed successfully
    pub documents_processed: usize,
    /// Documents that failed to parse or could not be read
    pub documents_failed: usize,
    /// Containers across all successfully parsed documents
    pub containers_parsed: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl CommandSummary {
    /// Whether every document parsed
    pub fn is_success(&self) -> bool {
        self.documents_failed == 0
    }

    /// Format a weight in kilograms as metric tonnes
    pub fn format_tonnes(kilograms: f64) -> String {
        format!("{:.1} t", kilograms / 1000.0)
    }
}

/// One document's parse outcome
#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub result: Result<ParseResult>,
}

/// Set up structured logging
///
/// `RUST_LOG` wins when set; otherwise the crate is filtered at `level`.
pub fn setup_logging(level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("baplie_processor={}", level)));

    let installed = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| Error::configuration(format!("Failed to install logger: {}", e)))?;

    debug!("Logging initialized at level: {}", level);
    Ok(())
}

/// Load configuration in layers (defaults -> file -> env) and apply CLI flags
pub fn load_configuration(common: &CommonArgs, workers: Option<usize>) -> Result<Config> {
    let mut config = Config::load_layered(common.config_file.as_deref())?;
    apply_cli_overrides(&mut config, common, workers);
    config.validate()?;
    Ok(config)
}

/// Apply command-line overrides to the loaded configuration
pub fn apply_cli_overrides(config: &mut Config, common: &CommonArgs, workers: Option<usize>) {
    if let Some(level) = common.get_log_level() {
        config.logging.level = level.to_string();
    }
    if let Some(workers) = workers {
        config.processing.workers = workers;
    }
}

/// Load configuration and install logging, in that order
pub fn initialize(common: &CommonArgs, workers: Option<usize>) -> Result<Config> {
    let config = load_configuration(common, workers)?;
    setup_logging(&config.logging.level, common.quiet)?;
    info!("Starting BAPLIE processor");
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Read and parse one document
pub fn parse_file(parser: &BaplieParser, path: &Path) -> Result<ParseResult> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    parser.parse_with_stats(&text)
}

/// Parse documents concurrently, one blocking task per document
///
/// At most `workers` documents are in flight. Outcomes come back in input
/// order. Once `cancellation_token` fires, documents not yet started fail
/// with [`Error::ProcessingInterrupted`].
pub async fn parse_documents(
    paths: Vec<PathBuf>,
    parser: &BaplieParser,
    workers: usize,
    cancellation_token: &CancellationToken,
    progress: Option<&ProgressBar>,
) -> Vec<DocumentOutcome> {
    info!(
        "Parsing {} documents with {} workers",
        paths.len(),
        workers
    );

    stream::iter(paths)
        .map(|path| {
            let parser = parser.clone();
            let token = cancellation_token.clone();
            async move {
                if token.is_cancelled() {
                    let result = Err(Error::processing_interrupted(
                        "Cancelled before parsing".to_string(),
                    ));
                    return DocumentOutcome { path, result };
                }

                let task_path = path.clone();
                let result = task::spawn_blocking(move || parse_file(&parser, &task_path))
                    .await
                    .unwrap_or_else(|e| {
                        Err(Error::processing_interrupted(format!(
                            "Parse task failed: {}",
                            e
                        )))
                    });
                DocumentOutcome { path, result }
            }
        })
        .buffered(workers.max(1))
        .inspect(|outcome| {
            if let Err(e) = &outcome.result {
                warn!("Failed to parse {}: {}", outcome.path.display(), e);
            }
            if let Some(pb) = progress {
                pb.inc(1);
            }
        })
        .collect()
        .await
}

/// Find documents under `directory` whose file name matches any pattern
pub fn discover_documents(directory: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    use walkdir::WalkDir;

    let patterns = patterns
        .iter()
        .map(|pattern| {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::configuration(format!("Invalid file pattern '{}': {}", pattern, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            patterns.iter().any(|pattern| pattern.matches(&name))
        })
        .map(|entry| entry.into_path())
        .collect();

    // Sort files for consistent processing order
    files.sort();

    debug!(
        "Discovered {} documents in {}",
        files.len(),
        directory.display()
    );

    Ok(files)
}

/// Check if an error should stop a batch rather than count as one failed file
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::ProcessingInterrupted { .. }
    )
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Write command output to a file, or to stdout when no path is given
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            info!("Wrote output to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

//! Validate command implementation
//!
//! Walks a directory, parses every matching document and reports failures
//! grouped by error kind.

use super::shared::{
    CommandSummary, DocumentOutcome, create_progress_bar, discover_documents, initialize,
    parse_documents,
};
use crate::app::services::baplie_parser::BaplieParser;
use crate::cli::args::ValidateArgs;
use crate::{ErrorKind, Result};
use colored::*;
use indicatif::HumanDuration;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Aggregated result of a validation run
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Documents that parsed
    pub passed: usize,
    /// Parsed documents whose statistics show skipped or unplaced content
    pub with_anomalies: Vec<PathBuf>,
    /// Failed documents grouped by error kind
    pub failures: BTreeMap<String, Vec<(PathBuf, String)>>,
    /// Containers across all parsed documents
    pub containers: usize,
}

impl ValidationReport {
    /// Build a report from parse outcomes
    pub fn from_outcomes(outcomes: &[DocumentOutcome]) -> Self {
        let mut report = Self::default();

        for outcome in outcomes {
            match &outcome.result {
                Ok(result) => {
                    report.passed += 1;
                    report.containers += result.voyage.total_containers();
                    if result.stats.has_anomalies() {
                        report.with_anomalies.push(outcome.path.clone());
                    }
                }
                Err(e) => {
                    report
                        .failures
                        .entry(kind_label(e.kind()).to_string())
                        .or_default()
                        .push((outcome.path.clone(), e.to_string()));
                }
            }
        }

        report
    }

    /// Number of failed documents
    pub fn failed(&self) -> usize {
        self.failures.values().map(Vec::len).sum()
    }

    /// Share of documents that parsed, as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.passed + self.failed();
        if total == 0 {
            100.0
        } else {
            (self.passed as f64 / total as f64) * 100.0
        }
    }
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Structural => "structural",
        ErrorKind::Semantic => "semantic",
        ErrorKind::FieldValidation => "field validation",
        ErrorKind::Environment => "environment",
    }
}

/// Validate command runner
pub async fn run_validate(
    args: ValidateArgs,
    cancellation_token: CancellationToken,
) -> Result<CommandSummary> {
    let start_time = Instant::now();

    args.validate()?;
    let config = initialize(&args.common, args.workers)?;

    let patterns = match &args.pattern {
        Some(pattern) => vec![pattern.clone()],
        None => config.processing.file_patterns.clone(),
    };
    let files = discover_documents(&args.directory, &patterns)?;
    info!(
        "Validating {} documents under {}",
        files.len(),
        args.directory.display()
    );

    if files.is_empty() {
        warn!("No documents match {:?}", patterns);
        println!(
            "{} no documents matching {} under {}",
            "Note:".yellow().bold(),
            patterns.join(", "),
            args.directory.display()
        );
        return Ok(CommandSummary {
            processing_time: start_time.elapsed(),
            ..Default::default()
        });
    }

    let progress_bar = (!args.common.quiet)
        .then(|| create_progress_bar(files.len() as u64, "Validating documents..."));

    let parser = BaplieParser::new(config.parser.clone());
    let outcomes = parse_documents(
        files,
        &parser,
        config.processing.workers,
        &cancellation_token,
        progress_bar.as_ref(),
    )
    .await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Validation complete");
    }

    let report = ValidationReport::from_outcomes(&outcomes);
    let summary = CommandSummary {
        documents_processed: report.passed,
        documents_failed: report.failed(),
        containers_parsed: report.containers,
        processing_time: start_time.elapsed(),
    };

    println!("{}", render_report(&report, &summary, args.detailed));

    Ok(summary)
}

/// Render the validation report
pub fn render_report(report: &ValidationReport, summary: &CommandSummary, detailed: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Validation Summary".bright_cyan().bold());
    let _ = writeln!(
        out,
        "  {} {} documents ({} containers)",
        "Passed:".green().bold(),
        report.passed,
        report.containers
    );

    if report.failed() == 0 {
        let _ = writeln!(out, "  {} 0", "Failed:".bold());
    } else {
        let _ = writeln!(out, "  {} {}", "Failed:".red().bold(), report.failed());
        for (kind, files) in &report.failures {
            let _ = writeln!(out, "    {}: {}", kind, files.len());
            if detailed {
                for (path, message) in files {
                    let _ = writeln!(out, "      {} - {}", path.display(), message);
                }
            }
        }
    }

    if !report.with_anomalies.is_empty() {
        let _ = writeln!(
            out,
            "  {} {} documents parsed with skipped or unplaced content",
            "Warnings:".yellow().bold(),
            report.with_anomalies.len()
        );
        if detailed {
            for path in &report.with_anomalies {
                let _ = writeln!(out, "      {}", path.display());
            }
        }
    }

    let _ = write!(
        out,
        "  {} {:.1}% in {}",
        "Success rate:".bold(),
        report.success_rate(),
        HumanDuration(summary.processing_time)
    );

    out
}

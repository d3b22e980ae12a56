//! Parse command implementation
//!
//! Parses one or more documents concurrently and renders each voyage as a
//! coloured summary or as JSON.

use super::shared::{
    CommandSummary, DocumentOutcome, create_progress_bar, initialize, is_critical_error,
    parse_documents, write_output,
};
use crate::app::models::VesselVoyage;
use crate::app::services::baplie_parser::{BaplieParser, ParseStats};
use crate::cli::args::{OutputFormat, ParseArgs};
use crate::{Error, Result};
use colored::*;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Parse command runner
pub async fn run_parse(
    args: ParseArgs,
    cancellation_token: CancellationToken,
) -> Result<CommandSummary> {
    let start_time = Instant::now();

    args.validate()?;
    let mut config = initialize(&args.common, args.workers)?;
    if let Some(direction) = args.direction {
        config.parser.direction = direction.into();
    }
    debug!("Parse arguments: {:?}", args);

    let parser = BaplieParser::new(config.parser.clone());
    let progress_bar = (args.files.len() > 1 && !args.common.quiet)
        .then(|| create_progress_bar(args.files.len() as u64, "Parsing documents..."));

    let outcomes = parse_documents(
        args.files.clone(),
        &parser,
        config.processing.workers,
        &cancellation_token,
        progress_bar.as_ref(),
    )
    .await;

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    if let Some(error) = outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().err())
        .find(|error| is_critical_error(error))
    {
        return Err(Error::processing_interrupted(error.to_string()));
    }

    // Plain text when writing to a file
    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let content = match args.format {
        OutputFormat::Summary => render_summaries(&outcomes),
        OutputFormat::Json => render_json(&outcomes)?,
    };
    write_output(args.output.as_deref(), &content)?;

    if args.format == OutputFormat::Json {
        // Failures would otherwise be invisible in JSON mode
        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                eprintln!("{} {}: {}", "Failed".red().bold(), outcome.path.display(), e);
            }
        }
    }

    let summary = summarize(&outcomes, start_time);
    info!(
        "Parsed {} of {} documents in {:.2}s",
        summary.documents_processed,
        outcomes.len(),
        summary.processing_time.as_secs_f64()
    );

    Ok(summary)
}

/// Tally outcomes into a command summary
pub fn summarize(outcomes: &[DocumentOutcome], start_time: Instant) -> CommandSummary {
    outcomes.iter().fold(
        CommandSummary {
            processing_time: start_time.elapsed(),
            ..Default::default()
        },
        |mut summary, outcome| {
            match &outcome.result {
                Ok(result) => {
                    summary.documents_processed += 1;
                    summary.containers_parsed += result.voyage.total_containers();
                }
                Err(_) => summary.documents_failed += 1,
            }
            summary
        },
    )
}

/// Render every outcome as a human-readable summary
pub fn render_summaries(outcomes: &[DocumentOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => render_voyage(&mut out, &outcome.path, &result.voyage, &result.stats),
            Err(e) => {
                let _ = writeln!(
                    out,
                    "{} {}\n  {}\n",
                    "Failed:".red().bold(),
                    outcome.path.display(),
                    e
                );
            }
        }
    }
    out.trim_end().to_string()
}

fn render_voyage(out: &mut String, path: &Path, voyage: &VesselVoyage, stats: &ParseStats) {
    let _ = writeln!(out, "{} {}", "File:".bright_cyan(), path.display());
    let _ = writeln!(
        out,
        "  {} {} (voyage {})",
        "Vessel:".bright_cyan(),
        voyage.vessel.name.bold(),
        voyage.voyage_number
    );

    let identifiers: Vec<String> = [
        voyage.vessel.imo_number.as_ref().map(|imo| format!("IMO {}", imo)),
        voyage.vessel.call_sign.as_ref().map(|cs| format!("call sign {}", cs)),
        voyage.vessel.flag.as_ref().map(|flag| format!("flag {}", flag)),
        voyage.vessel.operator.as_ref().map(|op| format!("operator {}", op)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !identifiers.is_empty() {
        let _ = writeln!(out, "  {} {}", "Vessel ids:".bright_cyan(), identifiers.join(", "));
    }

    if voyage.origin_port.is_some() || voyage.destination_port.is_some() {
        let _ = writeln!(
            out,
            "  {} {} -> {}",
            "Route:".bright_cyan(),
            voyage.origin_port.as_deref().unwrap_or("?"),
            voyage.destination_port.as_deref().unwrap_or("?")
        );
    }
    if let Some(date) = voyage.message_date {
        let _ = writeln!(out, "  {} {}", "Message date:".bright_cyan(), date);
    }

    let _ = writeln!(
        out,
        "  {} {} ({} full, {} empty) in {} bays",
        "Containers:".bright_cyan(),
        voyage.total_containers().to_string().bold(),
        voyage.full_containers(),
        voyage.empty_containers(),
        voyage.bays.len()
    );
    let _ = writeln!(
        out,
        "  {} gross {}, VGM {}",
        "Weight:".bright_cyan(),
        CommandSummary::format_tonnes(voyage.total_gross_weight()),
        CommandSummary::format_tonnes(voyage.total_vgm_weight())
    );
    let _ = writeln!(
        out,
        "  {} {} hazardous, {} reefer",
        "Special cargo:".bright_cyan(),
        voyage.hazardous_containers().len(),
        voyage.reefer_containers().len()
    );

    let ports = voyage.discharge_ports();
    if !ports.is_empty() {
        let by_port: Vec<String> = ports
            .iter()
            .map(|port| format!("{} ({})", port, voyage.containers_for_discharge(port).len()))
            .collect();
        let _ = writeln!(out, "  {} {}", "Discharge:".bright_cyan(), by_port.join(", "));
    }

    if stats.has_anomalies() {
        let _ = writeln!(
            out,
            "  {} {} unstowed, {} invalid positions, {} equipment dropped, {} outside message",
            "Warnings:".yellow().bold(),
            stats.containers_unstowed,
            stats.invalid_coordinates,
            stats.equipment_dropped,
            stats.segments_outside_message
        );
    }
    let _ = writeln!(out);
}

/// Render successful voyages as JSON
///
/// A single document renders as one object, several as an array.
pub fn render_json(outcomes: &[DocumentOutcome]) -> Result<String> {
    let voyages: Vec<&VesselVoyage> = outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().ok())
        .map(|result| &result.voyage)
        .collect();

    let json = if outcomes.len() == 1 {
        match voyages.first() {
            Some(voyage) => serde_json::to_string_pretty(voyage),
            None => Ok("null".to_string()),
        }
    } else {
        serde_json::to_string_pretty(&voyages)
    };

    json.map_err(|e| Error::serialization("Failed to serialize voyage".to_string(), e))
}

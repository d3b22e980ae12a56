//! Bays command implementation
//!
//! Prints the stowage plan bay by bay: one line per occupied slot with the
//! container, its weight and discharge port.

use super::shared::{CommandSummary, initialize, parse_documents};
use crate::app::models::{Bay, ContainerUnit, ReeferSettings, VesselVoyage};
use crate::app::services::baplie_parser::BaplieParser;
use crate::cli::args::BaysArgs;
use crate::{Error, Result};
use colored::*;
use std::fmt::Write as _;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Bays command runner
pub async fn run_bays(args: BaysArgs, cancellation_token: CancellationToken) -> Result<CommandSummary> {
    let start_time = Instant::now();

    args.validate()?;
    let config = initialize(&args.common, None)?;
    let parser = BaplieParser::new(config.parser.clone());

    let outcome = parse_documents(vec![args.file.clone()], &parser, 1, &cancellation_token, None)
        .await
        .pop()
        .ok_or_else(|| Error::processing_interrupted("No parse outcome".to_string()))?;
    let result = outcome.result?;
    let voyage = &result.voyage;

    let plan = match args.bay {
        Some(number) => match voyage.bay(number) {
            Some(bay) => render_bay(bay),
            None => format!(
                "{} bay {} is not in the plan (bays: {})",
                "Note:".yellow().bold(),
                number,
                bay_list(voyage)
            ),
        },
        None => render_plan(voyage),
    };
    println!("{}", plan);

    info!(
        "Displayed {} bays of {}",
        args.bay.map_or(voyage.bays.len(), |_| 1),
        voyage.vessel.name
    );

    Ok(CommandSummary {
        documents_processed: 1,
        containers_parsed: voyage.total_containers(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

fn bay_list(voyage: &VesselVoyage) -> String {
    let numbers: Vec<String> = voyage.bays.keys().map(|n| format!("{:03}", n)).collect();
    if numbers.is_empty() {
        "none".to_string()
    } else {
        numbers.join(", ")
    }
}

/// Render every bay, followed by containers without a position
pub fn render_plan(voyage: &VesselVoyage) -> String {
    let mut out = format!(
        "{} {} voyage {}: {} containers in {} bays\n\n",
        "Stowage plan".bright_cyan().bold(),
        voyage.vessel.name.bold(),
        voyage.voyage_number,
        voyage.total_containers(),
        voyage.bays.len()
    );

    for bay in voyage.bays.values() {
        out.push_str(&render_bay(bay));
        out.push('\n');
    }

    let unstowed = voyage.unstowed_containers();
    if !unstowed.is_empty() {
        let _ = writeln!(
            out,
            "{} {} containers without a valid position",
            "Unstowed:".yellow().bold(),
            unstowed.len()
        );
        for container in unstowed {
            let _ = writeln!(out, "  {:<5} {}", "-", container_line(container));
        }
    }

    out.trim_end().to_string()
}

/// Render one bay: header line, then one line per slot in row/tier order
pub fn render_bay(bay: &Bay) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {:03} ({}) {} containers, {} slots, {} on deck / {} below, gross {}",
        "Bay".bright_cyan().bold(),
        bay.bay_number,
        if bay.is_40ft_bay { "40ft" } else { "20ft" },
        bay.container_count(),
        bay.occupancy(),
        bay.on_deck_count(),
        bay.below_deck_count(),
        CommandSummary::format_tonnes(bay.total_weight())
    );

    for (key, slot) in &bay.slots {
        let container = slot
            .container_id
            .as_deref()
            .and_then(|id| bay.containers.iter().find(|c| c.container_id == id));
        match container {
            Some(container) => {
                let _ = writeln!(out, "  {:<5} {}", key, container_line(container));
            }
            None => {
                let _ = writeln!(out, "  {:<5} {}", key, "(empty)".dimmed());
            }
        }
    }

    out
}

fn container_line(container: &ContainerUnit) -> String {
    let mut flags = Vec::new();
    if container.is_hazardous() {
        flags.push("DG".red().to_string());
    }
    if container.is_reefer() {
        let set_point = match &container.reefer {
            Some(ReeferSettings {
                temperature: Some(temperature),
                unit,
            }) => format!("RF {}{}", temperature, unit.symbol()),
            _ => "RF".to_string(),
        };
        flags.push(set_point.blue().to_string());
    }

    format!(
        "{:<12} {:<5} {:<7} {:>9} {:<6} {}",
        container.container_id,
        container.iso_type.as_deref().unwrap_or("-"),
        format!("{:?}", container.status),
        container
            .gross_weight
            .map(CommandSummary::format_tonnes)
            .unwrap_or_else(|| "-".to_string()),
        container.discharge_port.as_deref().unwrap_or("-"),
        flags.join(" ")
    )
    .trim_end()
    .to_string()
}

//! Core BAPLIE parser implementation
//!
//! This module provides the main parser orchestration: tokenizing the text,
//! running the metadata, vessel and container passes over the same segment
//! sequence, aggregating bays and assembling the voyage.

use tracing::{debug, info};

use super::container_group::group_containers;
use super::header::{extract_metadata, message_date};
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::tokenize;
use super::vessel::extract_voyage_header;
use crate::app::models::VesselVoyage;
use crate::app::services::bay_aggregator::aggregate_bays;
use crate::config::ParserConfig;
use crate::{Error, Result};

/// BAPLIE parser for stowage plan documents
///
/// Parsing is a pure, single pass over the input: no I/O, no shared state, so
/// one parser can be used from any number of threads at once.
#[derive(Debug, Clone, Default)]
pub struct BaplieParser {
    config: ParserConfig,
}

impl BaplieParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a document into a voyage
    pub fn parse(&self, text: &str) -> Result<VesselVoyage> {
        self.parse_with_stats(text).map(|result| result.voyage)
    }

    /// Parse a document, returning the voyage with parsing statistics
    pub fn parse_with_stats(&self, text: &str) -> Result<ParseResult> {
        if text.trim().is_empty() {
            return Err(Error::empty_document());
        }

        let segments = tokenize(text, &self.config.delimiters);
        if segments.is_empty() {
            return Err(Error::no_valid_segments());
        }
        debug!("Tokenized {} segments", segments.len());

        let metadata = extract_metadata(&segments);
        let header = extract_voyage_header(&segments, &self.config)?;
        let groups = group_containers(&segments);
        let bays = aggregate_bays(&groups.containers);

        let mut stats = ParseStats::new();
        stats.total_segments = segments.len();
        stats.record_groups(&groups.stats);
        stats.containers_parsed = groups.containers.len();
        stats.containers_unstowed = groups
            .containers
            .iter()
            .filter(|container| container.coordinate.is_none())
            .count();

        let voyage = VesselVoyage {
            vessel: header.vessel,
            voyage_number: header.voyage_number,
            direction: self.config.direction,
            origin_port: header.origin_port,
            destination_port: header.destination_port,
            message_date: segments.iter().find_map(message_date),
            containers: groups.containers,
            bays,
            metadata,
        };

        info!(
            "Parsed {} voyage {}: {} containers in {} bays",
            voyage.vessel.name,
            voyage.voyage_number,
            voyage.total_containers(),
            voyage.bays.len()
        );

        Ok(ParseResult { voyage, stats })
    }
}

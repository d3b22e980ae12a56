//! Parsing statistics and result structures for BAPLIE processing
//!
//! This module provides types for reporting what a parse saw and skipped,
//! alongside the voyage it produced.

use super::container_group::GroupStats;
use crate::app::models::VesselVoyage;

/// Parsing result with the voyage and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed voyage
    pub voyage: VesselVoyage,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Segments produced by the tokenizer
    pub total_segments: usize,

    /// Stowage position (LOC+147) segments encountered
    pub stowage_groups: usize,

    /// Containers emitted
    pub containers_parsed: usize,

    /// Containers emitted without a usable stowage coordinate
    pub containers_unstowed: usize,

    /// Stowage positions that failed coordinate validation
    pub invalid_coordinates: usize,

    /// Container equipment segments dropped for lack of a container number
    pub equipment_dropped: usize,

    /// Container segments ignored between a message trailer and the next header
    pub segments_outside_message: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the grouping counters in
    pub fn record_groups(&mut self, groups: &GroupStats) {
        self.stowage_groups = groups.stowage_groups;
        self.invalid_coordinates = groups.invalid_coordinates;
        self.equipment_dropped = groups.equipment_dropped;
        self.segments_outside_message = groups.segments_outside_message;
    }

    /// Share of stowage groups that produced a container, as a percentage
    ///
    /// Capped at 100: a group with two EQD segments emits two containers.
    pub fn stowage_coverage(&self) -> f64 {
        if self.stowage_groups == 0 {
            0.0
        } else {
            let stowed = self
                .containers_parsed
                .saturating_sub(self.containers_unstowed);
            (stowed as f64 / self.stowage_groups as f64 * 100.0).min(100.0)
        }
    }

    /// Whether anything was skipped or could not be placed
    pub fn has_anomalies(&self) -> bool {
        self.invalid_coordinates > 0
            || self.equipment_dropped > 0
            || self.segments_outside_message > 0
            || self.containers_unstowed > 0
    }
}

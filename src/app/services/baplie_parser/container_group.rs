//! Container grouping
//!
//! The attributes of one container are spread over several segments: a
//! stowage LOC opens the group, MEA segments carry weights, EQD names the
//! container, and NAD/DGS/TMP add operator, hazard and reefer details. Senders
//! disagree on the order, in particular MEA may come before or after EQD.
//!
//! The pass is a fold: [`GroupState`] is moved into [`GroupState::step`] for
//! every segment and a new state comes back. Three pieces of state drive it:
//! - the group context (stowage coordinate and ports),
//! - weights seen before the group's EQD,
//! - the container currently open, if any.
//!
//! An open container is emitted when the next stowage LOC arrives, at UNT, or
//! at the end of input. It takes the coordinate and ports of the context in
//! force at that moment.

use super::field_parsers::{
    find_component_from, first_number_from, get_component, get_string, get_value,
    parse_optional_f64,
};
use super::tokenizer::Segment;
use crate::app::models::{
    ContainerStatus, ContainerUnit, HazardInfo, IsoCoordinate, ReeferSettings, TemperatureUnit,
    WeightKind,
};
use crate::constants::{
    equipment_qualifiers, location_qualifiers, party_qualifiers, segment_tags, UNIT_ID_PREFIX,
};
use tracing::{debug, warn};

/// EQD elements from this position onwards are searched for the full/empty code
const STATUS_SEARCH_START: usize = 4;

/// Coordinate and ports of the group being read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupContext {
    pub coordinate: Option<IsoCoordinate>,
    pub load_port: Option<String>,
    pub discharge_port: Option<String>,
    pub destination_port: Option<String>,
}

impl GroupContext {
    /// Context for a new stowage group
    fn stowed_at(coordinate: Option<IsoCoordinate>) -> Self {
        Self {
            coordinate,
            ..Self::default()
        }
    }

    /// Copy with one port field set, selected by LOC qualifier
    fn with_port(self, qualifier: &str, port: Option<String>) -> Self {
        match qualifier {
            location_qualifiers::PLACE_OF_LOADING => Self {
                load_port: port,
                ..self
            },
            location_qualifiers::PLACE_OF_DISCHARGE => Self {
                discharge_port: port,
                ..self
            },
            location_qualifiers::PLACE_OF_DELIVERY => Self {
                destination_port: port,
                ..self
            },
            _ => self,
        }
    }

    /// Stamp a finished container with this context
    fn apply_to(&self, container: ContainerUnit) -> ContainerUnit {
        ContainerUnit {
            coordinate: self.coordinate.clone(),
            load_port: self.load_port.clone(),
            discharge_port: self.discharge_port.clone(),
            destination_port: self.destination_port.clone(),
            ..container
        }
    }
}

/// Weights read before the group's EQD segment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingWeights {
    pub gross: Option<f64>,
    pub vgm: Option<f64>,
    pub tare: Option<f64>,
}

impl PendingWeights {
    fn with(self, kind: WeightKind, kilograms: f64) -> Self {
        match kind {
            WeightKind::Gross => Self {
                gross: Some(kilograms),
                ..self
            },
            WeightKind::VerifiedGrossMass => Self {
                vgm: Some(kilograms),
                ..self
            },
            WeightKind::Tare => Self {
                tare: Some(kilograms),
                ..self
            },
        }
    }

    fn apply_to(self, container: ContainerUnit) -> ContainerUnit {
        [
            (WeightKind::Gross, self.gross),
            (WeightKind::VerifiedGrossMass, self.vgm),
            (WeightKind::Tare, self.tare),
        ]
        .into_iter()
        .fold(container, |container, (kind, weight)| match weight {
            Some(kilograms) => container.with_weight(kind, kilograms),
            None => container,
        })
    }
}

/// Counters collected while grouping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    /// Stowage LOC segments seen
    pub stowage_groups: usize,
    /// Stowage LOC segments whose coordinate failed validation
    pub invalid_coordinates: usize,
    /// Container EQD segments without a container number
    pub equipment_dropped: usize,
    /// Container segments seen between UNT and the next UNH
    pub segments_outside_message: usize,
}

/// Everything the grouping pass produced
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome {
    pub containers: Vec<ContainerUnit>,
    pub stats: GroupStats,
}

/// Accumulator threaded through the grouping fold
#[derive(Debug, Clone, PartialEq)]
pub struct GroupState {
    context: GroupContext,
    pending: PendingWeights,
    open: Option<ContainerUnit>,
    emitted: Vec<ContainerUnit>,
    next_sequence: usize,
    in_message: bool,
    stats: GroupStats,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            context: GroupContext::default(),
            pending: PendingWeights::default(),
            open: None,
            emitted: Vec::new(),
            next_sequence: 1,
            in_message: true,
            stats: GroupStats::default(),
        }
    }
}

impl GroupState {
    /// Advance the state by one segment
    pub fn step(self, segment: &Segment) -> Self {
        match segment.tag.as_str() {
            segment_tags::UNH => self.begin_message(),
            segment_tags::UNT => self.end_message(),
            segment_tags::LOC | segment_tags::MEA | segment_tags::EQD | segment_tags::NAD
            | segment_tags::DGS | segment_tags::TMP
                if !self.in_message =>
            {
                debug!("Ignoring {} outside a message: {}", segment.tag, segment.raw);
                self.count(|stats| stats.segments_outside_message += 1)
            }
            segment_tags::LOC => self.on_location(segment),
            segment_tags::MEA => self.on_measurement(segment),
            segment_tags::EQD => self.on_equipment(segment),
            segment_tags::NAD => self.on_party(segment),
            segment_tags::DGS => self.on_dangerous_goods(segment),
            segment_tags::TMP => self.on_temperature(segment),
            _ => self,
        }
    }

    /// Flush any open container and return the result
    pub fn finish(self) -> GroupOutcome {
        let state = self.flush();
        GroupOutcome {
            containers: state.emitted,
            stats: state.stats,
        }
    }

    /// Container currently open, if any
    pub fn open_container(&self) -> Option<&ContainerUnit> {
        self.open.as_ref()
    }

    /// Containers emitted so far
    pub fn emitted(&self) -> &[ContainerUnit] {
        &self.emitted
    }

    fn count(self, update: impl FnOnce(&mut GroupStats)) -> Self {
        let mut stats = self.stats;
        update(&mut stats);
        Self { stats, ..self }
    }

    /// Emit the open container, if any, with the current context
    fn flush(self) -> Self {
        match self.open {
            Some(container) => {
                let container = self.context.apply_to(container);
                let mut emitted = self.emitted;
                emitted.push(container);
                Self {
                    open: None,
                    emitted,
                    ..self
                }
            }
            None => self,
        }
    }

    fn begin_message(self) -> Self {
        let state = self.flush();
        Self {
            context: GroupContext::default(),
            pending: PendingWeights::default(),
            in_message: true,
            ..state
        }
    }

    fn end_message(self) -> Self {
        let state = self.flush();
        Self {
            in_message: false,
            ..state
        }
    }

    fn on_location(self, segment: &Segment) -> Self {
        let Some(qualifier) = get_value(segment, 1) else {
            return self;
        };

        if qualifier != location_qualifiers::STOWAGE_CELL {
            let port = get_string(segment, 2, 0);
            let context = self.context.clone().with_port(qualifier, port);
            return Self { context, ..self };
        }

        let raw = get_value(segment, 2).unwrap_or_default();
        let coordinate = IsoCoordinate::try_parse(raw);
        let state = self.flush().count(|stats| {
            stats.stowage_groups += 1;
            if coordinate.is_none() {
                stats.invalid_coordinates += 1;
            }
        });
        if coordinate.is_none() {
            warn!("Stowage position '{}' is not a valid ISO coordinate", raw);
        }

        Self {
            context: GroupContext::stowed_at(coordinate),
            pending: PendingWeights::default(),
            ..state
        }
    }

    fn on_measurement(self, segment: &Segment) -> Self {
        let Some((kind, kilograms)) = decode_measurement(segment) else {
            debug!("Ignoring measurement segment: {}", segment.raw);
            return self;
        };

        match self.open {
            Some(container) => Self {
                open: Some(container.with_weight(kind, kilograms)),
                ..self
            },
            None => Self {
                pending: self.pending.with(kind, kilograms),
                ..self
            },
        }
    }

    fn on_equipment(self, segment: &Segment) -> Self {
        if get_value(segment, 1) != Some(equipment_qualifiers::CONTAINER) {
            return self;
        }

        // A second EQD in one group closes the container before it
        let state = self.flush();

        let Some(container_id) = get_string(segment, 2, 0) else {
            debug!("Dropping equipment without container number: {}", segment.raw);
            return state.count(|stats| stats.equipment_dropped += 1);
        };

        let id = format!("{}{:05}", UNIT_ID_PREFIX, state.next_sequence);
        let container = ContainerUnit::new(id, container_id).with_status(equipment_status(segment));
        let container = match get_string(segment, 3, 0) {
            Some(iso_type) => container.with_iso_type(iso_type),
            None => container,
        };

        Self {
            open: Some(state.pending.apply_to(container)),
            pending: PendingWeights::default(),
            next_sequence: state.next_sequence + 1,
            ..state
        }
    }

    fn on_party(self, segment: &Segment) -> Self {
        if get_value(segment, 1) != Some(party_qualifiers::CARRIER) {
            return self;
        }

        match (self.open, get_string(segment, 2, 0)) {
            (Some(container), Some(operator)) => Self {
                open: Some(container.with_operator(operator)),
                ..self
            },
            (open, _) => Self { open, ..self },
        }
    }

    fn on_dangerous_goods(self, segment: &Segment) -> Self {
        match self.open {
            Some(container) if container.hazard.is_none() => {
                let hazard = HazardInfo {
                    imdg_class: get_string(segment, 2, 0),
                    un_number: get_string(segment, 3, 0),
                };
                Self {
                    open: Some(container.with_hazard(hazard)),
                    ..self
                }
            }
            open => {
                if open.is_some() {
                    debug!("Keeping first hazard, ignoring: {}", segment.raw);
                }
                Self { open, ..self }
            }
        }
    }

    fn on_temperature(self, segment: &Segment) -> Self {
        match self.open {
            Some(container) => {
                let reefer = ReeferSettings {
                    temperature: parse_optional_f64(segment, 2, 0),
                    unit: TemperatureUnit::from_code(get_component(segment, 2, 1)),
                };
                Self {
                    open: Some(container.with_reefer(reefer)),
                    ..self
                }
            }
            None => self,
        }
    }
}

/// Run the grouping pass over a segment sequence
pub fn group_containers(segments: &[Segment]) -> GroupOutcome {
    segments
        .iter()
        .fold(GroupState::default(), GroupState::step)
        .finish()
}

/// Decode a MEA segment into a weight
///
/// The qualifier is looked for at element 1 first and at element 2 second;
/// the value is the first numeric component after the qualifier.
pub fn decode_measurement(segment: &Segment) -> Option<(WeightKind, f64)> {
    [1, 2].into_iter().find_map(|position| {
        let kind = get_value(segment, position).and_then(WeightKind::from_qualifier)?;
        let kilograms = first_number_from(segment, position + 1)?;
        Some((kind, kilograms))
    })
}

/// Full/empty indicator of an EQD segment
pub fn equipment_status(segment: &Segment) -> ContainerStatus {
    find_component_from(segment, STATUS_SEARCH_START, |value| {
        ContainerStatus::from_code(value).is_some()
    })
    .and_then(ContainerStatus::from_code)
    .unwrap_or(ContainerStatus::Unknown)
}

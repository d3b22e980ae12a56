//! Vessel and voyage identification
//!
//! Reads the main-carriage TDT segment for vessel identity and voyage number,
//! falling back to an RFF+VM reference for the vessel name, and picks up the
//! voyage-level departure and next-call ports (LOC+5, LOC+61).

use super::field_parsers::{get_component, get_string};
use super::tokenizer::Segment;
use crate::app::models::Vessel;
use crate::config::ParserConfig;
use crate::constants::{
    location_qualifiers, reference_qualifiers, segment_tags, transport_qualifiers,
    vessel_code_lists,
};
use crate::{Error, Result};
use tracing::debug;

/// TDT element carrying the carrier (C040)
const CARRIER_ELEMENT: usize = 5;

/// TDT element carrying the transport identification (C222)
const TRANSPORT_ID_ELEMENT: usize = 8;

/// Component of C222 holding the vessel name
const VESSEL_NAME_COMPONENT: usize = 3;

/// Component of C222 used when the name component is empty
const VESSEL_NAME_FALLBACK_COMPONENT: usize = 0;

/// Component of C222 holding the nationality (flag)
const FLAG_COMPONENT: usize = 4;

/// Vessel identity and voyage-level details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyageHeader {
    pub vessel: Vessel,
    pub voyage_number: String,
    pub origin_port: Option<String>,
    pub destination_port: Option<String>,
}

/// Extract vessel identity and voyage details
///
/// Fails with [`Error::MissingVessel`] when neither the main-carriage TDT nor
/// an RFF+VM reference yields a vessel name.
pub fn extract_voyage_header(segments: &[Segment], config: &ParserConfig) -> Result<VoyageHeader> {
    let transport = segments.iter().find(|segment| is_main_carriage(segment));

    let mut vessel = match transport {
        Some(segment) => vessel_from_transport(segment),
        None => {
            debug!("No main-carriage TDT segment found");
            Vessel::new(String::new())
        }
    };

    if vessel.name.is_empty() {
        match vessel_name_from_reference(segments) {
            Some(name) => {
                debug!("Vessel name taken from RFF+VM reference: {}", name);
                vessel.name = name;
            }
            None => return Err(Error::missing_vessel(segment_tags::TDT)),
        }
    }

    let voyage_number = transport
        .and_then(|segment| get_string(segment, 2, 0))
        .unwrap_or_else(|| config.unknown_voyage.clone());

    Ok(VoyageHeader {
        vessel,
        voyage_number,
        origin_port: voyage_port(segments, location_qualifiers::PORT_OF_DEPARTURE),
        destination_port: voyage_port(segments, location_qualifiers::NEXT_PORT_OF_CALL),
    })
}

/// Whether a segment is a TDT for the main-carriage stage
pub fn is_main_carriage(segment: &Segment) -> bool {
    segment.is(segment_tags::TDT)
        && get_component(segment, 1, 0) == Some(transport_qualifiers::MAIN_CARRIAGE)
}

/// Read vessel identity out of a TDT segment; the name may come back empty
pub fn vessel_from_transport(segment: &Segment) -> Vessel {
    let name = get_string(segment, TRANSPORT_ID_ELEMENT, VESSEL_NAME_COMPONENT)
        .or_else(|| get_string(segment, TRANSPORT_ID_ELEMENT, VESSEL_NAME_FALLBACK_COMPONENT))
        .unwrap_or_default();

    let identifier = get_string(segment, TRANSPORT_ID_ELEMENT, 0);
    let code_list = get_component(segment, TRANSPORT_ID_ELEMENT, 1);

    Vessel {
        name,
        imo_number: identifier
            .clone()
            .filter(|_| code_list == Some(vessel_code_lists::IMO_NUMBER)),
        call_sign: identifier.filter(|_| code_list == Some(vessel_code_lists::CALL_SIGN)),
        flag: get_string(segment, TRANSPORT_ID_ELEMENT, FLAG_COMPONENT),
        operator: get_string(segment, CARRIER_ELEMENT, 0),
    }
}

/// Vessel name from the first RFF segment qualified VM
pub fn vessel_name_from_reference(segments: &[Segment]) -> Option<String> {
    segments
        .iter()
        .filter(|segment| segment.is(segment_tags::RFF))
        .filter(|segment| get_component(segment, 1, 0) == Some(reference_qualifiers::VESSEL_NAME))
        .find_map(|segment| get_string(segment, 1, 1))
}

/// Port code of the first LOC segment with the given voyage-level qualifier
fn voyage_port(segments: &[Segment], qualifier: &str) -> Option<String> {
    segments
        .iter()
        .filter(|segment| segment.is(segment_tags::LOC))
        .filter(|segment| get_component(segment, 1, 0) == Some(qualifier))
        .find_map(|segment| get_string(segment, 2, 0))
}

//! Message envelope extraction
//!
//! This module reads the interchange and message headers (UNB, UNH, BGM) and
//! the message date (DTM+137) into [`BaplieMetadata`]. Extraction is
//! best-effort and never fails the parse.

use super::field_parsers::{get_component, get_element, get_string, parse_edifact_datetime};
use super::tokenizer::Segment;
use crate::app::models::BaplieMetadata;
use crate::constants::{date_qualifiers, segment_tags};
use chrono::NaiveDateTime;
use tracing::debug;

/// Extract message metadata from the segment sequence
///
/// Only the first occurrence of each header segment is used. Returns `None`
/// when neither a message reference nor a message type was found.
pub fn extract_metadata(segments: &[Segment]) -> Option<BaplieMetadata> {
    let mut metadata = BaplieMetadata::default();
    let mut seen_unb = false;
    let mut seen_unh = false;
    let mut seen_bgm = false;

    for segment in segments {
        match segment.tag.as_str() {
            segment_tags::UNB if !seen_unb => {
                seen_unb = true;
                metadata.sender = get_string(segment, 2, 0);
                metadata.recipient = get_string(segment, 3, 0);
            }
            segment_tags::UNH if !seen_unh => {
                seen_unh = true;
                metadata.message_reference = get_string(segment, 1, 0);
                metadata.message_type = get_string(segment, 2, 0);
                metadata.version = message_version(segment);
            }
            segment_tags::BGM if !seen_bgm => {
                seen_bgm = true;
                metadata.document_number = get_string(segment, 2, 0);
            }
            segment_tags::DTM if metadata.prepared_at.is_none() => {
                metadata.prepared_at = message_date(segment);
            }
            _ => {}
        }
    }

    if metadata.message_reference.is_none() && metadata.message_type.is_none() {
        debug!("No UNH reference or message type found; metadata omitted");
        return None;
    }

    Some(metadata)
}

/// Decode a DTM segment if it carries the document/message date
pub fn message_date(segment: &Segment) -> Option<NaiveDateTime> {
    if !segment.is(segment_tags::DTM) {
        return None;
    }
    if get_component(segment, 1, 0) != Some(date_qualifiers::MESSAGE_DATE) {
        return None;
    }

    let value = get_component(segment, 1, 1)?;
    let decoded = parse_edifact_datetime(value);
    if decoded.is_none() {
        debug!("Ignoring message date with unrecognised form: '{}'", value);
    }
    decoded
}

/// Version, release, agency and association code joined as written
fn message_version(segment: &Segment) -> Option<String> {
    let components = get_element(segment, 2)?;
    let parts: Vec<&str> = components
        .iter()
        .skip(1)
        .map(|component| component.trim())
        .collect();

    let joined = parts.join(":");
    let joined = joined.trim_end_matches(':');
    if joined.trim_matches(':').is_empty() {
        None
    } else {
        Some(joined.to_string())
    }
}

//! EDIFACT segment tokenization
//!
//! Splits raw message text into segments, each segment into data elements and
//! each element into components. Line breaks are removed first because
//! senders do not reliably put one segment per line.
//!
//! The release character (`?`) is not interpreted: an escaped delimiter is
//! split like any other.

use crate::config::Delimiters;
use crate::constants::RELEASE_CHARACTER;
use tracing::debug;

/// One EDIFACT segment
///
/// `elements[0]` holds the segment tag, so element positions match the
/// numbering used in the message implementation guides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment type ("LOC", "EQD", ...)
    pub tag: String,

    /// Data elements, each split into its components
    pub elements: Vec<Vec<String>>,

    /// The trimmed segment text without its terminator
    pub raw: String,
}

impl Segment {
    /// Split one segment's text into elements and components
    pub fn parse(raw: &str, delimiters: &Delimiters) -> Self {
        let raw = raw.trim();

        let elements: Vec<Vec<String>> = raw
            .split(delimiters.element)
            .map(|element| {
                element
                    .split(delimiters.component)
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        let tag = match raw.find(delimiters.element) {
            Some(index) => raw[..index].trim().to_string(),
            None => raw.chars().take(3).collect(),
        };

        Self {
            tag,
            elements,
            raw: raw.to_string(),
        }
    }

    /// Whether this segment has the given tag
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Number of data elements, including the tag
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// Remove every line-break character from the text
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// Tokenize a complete document into its segments, in order
///
/// Empty pieces (consecutive terminators, trailing whitespace) are dropped.
pub fn tokenize(text: &str, delimiters: &Delimiters) -> Vec<Segment> {
    let text = normalize(text);
    if text.contains(RELEASE_CHARACTER) {
        debug!("Release character present, escaped delimiters will be split");
    }

    text
        .split(delimiters.segment)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| Segment::parse(piece, delimiters))
        .collect()
}

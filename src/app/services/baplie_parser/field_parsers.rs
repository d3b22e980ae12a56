//! Field access utilities for EDIFACT segments
//!
//! This module provides bounds-checked helpers for reading elements and
//! components out of a [`Segment`]. None of them fail: out-of-range positions
//! and values that trim to nothing come back as `None`, and the caller decides
//! whether that matters.

use super::tokenizer::Segment;
use chrono::{NaiveDate, NaiveDateTime};

/// Get all components of a data element
pub fn get_element(segment: &Segment, element: usize) -> Option<&[String]> {
    segment.elements.get(element).map(Vec::as_slice)
}

/// Get one component of a data element, trimmed, if non-empty
pub fn get_component(segment: &Segment, element: usize, component: usize) -> Option<&str> {
    segment
        .elements
        .get(element)
        .and_then(|components| components.get(component))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Get the first component of a data element
pub fn get_value(segment: &Segment, element: usize) -> Option<&str> {
    get_component(segment, element, 0)
}

/// Get a component as an owned string
pub fn get_string(segment: &Segment, element: usize, component: usize) -> Option<String> {
    get_component(segment, element, component).map(str::to_string)
}

/// Parse a component as a decimal number
pub fn parse_optional_f64(segment: &Segment, element: usize, component: usize) -> Option<f64> {
    get_component(segment, element, component).and_then(parse_number)
}

/// Parse a numeric string, accepting a decimal comma
pub fn parse_number(value: &str) -> Option<f64> {
    let normalized = value.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// First component, from element `start` onwards, that parses as a number
pub fn first_number_from(segment: &Segment, start: usize) -> Option<f64> {
    segment
        .elements
        .iter()
        .skip(start)
        .flat_map(|components| components.iter())
        .find_map(|value| parse_number(value))
}

/// Find the first component from element `start` onwards matching `predicate`
pub fn find_component_from<'a, P>(segment: &'a Segment, start: usize, predicate: P) -> Option<&'a str>
where
    P: Fn(&str) -> bool,
{
    segment
        .elements
        .iter()
        .skip(start)
        .flat_map(|components| components.iter())
        .map(|value| value.trim())
        .find(|value| !value.is_empty() && predicate(value))
}

/// Decode an EDIFACT date or date-time value
///
/// Accepts `CCYYMMDD` (format 102, midnight assumed) and `CCYYMMDDHHMM`
/// (format 203). Any other length, or an impossible date, yields `None`.
pub fn parse_edifact_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let number = |range: std::ops::Range<usize>| value.get(range)?.parse::<u32>().ok();

    let (hour, minute) = match value.len() {
        8 => (0, 0),
        12 => (number(8..10)?, number(10..12)?),
        _ => return None,
    };

    let year = i32::try_from(number(0..4)?).ok()?;
    NaiveDate::from_ymd_opt(year, number(4..6)?, number(6..8)?)?.and_hms_opt(hour, minute, 0)
}

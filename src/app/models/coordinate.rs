//! ISO 9711 stowage coordinates
//!
//! A stowage position is written as seven digits `BBBRRTT`: a three digit bay,
//! a two digit row and a two digit tier. [`IsoCoordinate::parse`] and
//! [`IsoCoordinate::format`] are strict inverses of each other.

use crate::constants::{COORDINATE_LENGTH, MAX_BAY, MAX_ROW, MAX_TIER, ON_DECK_TIER_START};
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

static COORDINATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{7}$").expect("coordinate pattern is a valid regex")
});

/// Position of a container on board, as bay, row and tier
///
/// Equality and hashing consider only the numeric components; `raw_code` is
/// always the canonical formatting of those components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CoordinateFields")]
pub struct IsoCoordinate {
    bay: u16,
    row: u8,
    tier: u8,
    raw_code: String,
}

impl IsoCoordinate {
    /// Parse a 7-digit stowage code, failing on anything else
    pub fn parse(code: &str) -> Result<Self> {
        let trimmed = code.trim();

        if trimmed.chars().count() != COORDINATE_LENGTH {
            return Err(Error::invalid_coordinate(
                code,
                format!(
                    "expected {} characters, found {}",
                    COORDINATE_LENGTH,
                    trimmed.chars().count()
                ),
            ));
        }

        if !COORDINATE_PATTERN.is_match(trimmed) {
            return Err(Error::invalid_coordinate(code, "expected digits only"));
        }

        // All seven characters are ASCII digits at this point
        let bay = trimmed[0..3]
            .parse::<u16>()
            .map_err(|e| Error::invalid_coordinate(code, e.to_string()))?;
        let row = trimmed[3..5]
            .parse::<u8>()
            .map_err(|e| Error::invalid_coordinate(code, e.to_string()))?;
        let tier = trimmed[5..7]
            .parse::<u8>()
            .map_err(|e| Error::invalid_coordinate(code, e.to_string()))?;

        Ok(Self {
            bay,
            row,
            tier,
            raw_code: trimmed.to_string(),
        })
    }

    /// Parse a stowage code, returning `None` where [`parse`](Self::parse) would fail
    pub fn try_parse(code: &str) -> Option<Self> {
        Self::parse(code).ok()
    }

    /// Check whether a code would parse
    pub fn is_valid(code: &str) -> bool {
        COORDINATE_PATTERN.is_match(code.trim())
    }

    /// Build a coordinate from its components
    ///
    /// Components are checked in bay, row, tier order and the first one out of
    /// range is reported.
    pub fn from_values(bay: u32, row: u32, tier: u32) -> Result<Self> {
        if bay > u32::from(MAX_BAY) {
            return Err(Error::coordinate_out_of_range("bay", bay, u32::from(MAX_BAY)));
        }
        if row > u32::from(MAX_ROW) {
            return Err(Error::coordinate_out_of_range("row", row, u32::from(MAX_ROW)));
        }
        if tier > u32::from(MAX_TIER) {
            return Err(Error::coordinate_out_of_range(
                "tier",
                tier,
                u32::from(MAX_TIER),
            ));
        }

        let (bay, row, tier) = (bay as u16, row as u8, tier as u8);
        Ok(Self {
            bay,
            row,
            tier,
            raw_code: Self::format_components(bay, row, tier),
        })
    }

    fn format_components(bay: u16, row: u8, tier: u8) -> String {
        format!("{:03}{:02}{:02}", bay, row, tier)
    }

    /// Canonical 7-digit representation
    pub fn format(&self) -> String {
        Self::format_components(self.bay, self.row, self.tier)
    }

    pub fn bay(&self) -> u16 {
        self.bay
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    /// The code this coordinate was parsed from
    pub fn raw_code(&self) -> &str {
        &self.raw_code
    }

    /// Key identifying the slot within its bay, zero-padded row then tier
    pub fn slot_key(&self) -> String {
        format!("{:02}{:02}", self.row, self.tier)
    }

    /// Whether the tier number lies in the on-deck range
    pub fn is_on_deck(&self) -> bool {
        self.tier >= ON_DECK_TIER_START
    }
}

impl PartialEq for IsoCoordinate {
    fn eq(&self, other: &Self) -> bool {
        (self.bay, self.row, self.tier) == (other.bay, other.row, other.tier)
    }
}

impl Eq for IsoCoordinate {}

impl Hash for IsoCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.bay, self.row, self.tier).hash(state);
    }
}

impl fmt::Display for IsoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl FromStr for IsoCoordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Wire shape of a coordinate; decoding re-validates the components
#[derive(Debug, Deserialize)]
struct CoordinateFields {
    bay: u32,
    row: u32,
    tier: u32,
    #[serde(default)]
    raw_code: Option<String>,
}

impl TryFrom<CoordinateFields> for IsoCoordinate {
    type Error = Error;

    fn try_from(fields: CoordinateFields) -> Result<Self> {
        let coordinate = Self::from_values(fields.bay, fields.row, fields.tier)?;
        match fields.raw_code {
            Some(raw) if raw != coordinate.raw_code => Err(Error::invalid_coordinate(
                raw,
                format!("does not match components {}", coordinate.raw_code),
            )),
            _ => Ok(coordinate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_components() {
        let coordinate = IsoCoordinate::parse("0120182").unwrap();
        assert_eq!(coordinate.bay(), 12);
        assert_eq!(coordinate.row(), 1);
        assert_eq!(coordinate.tier(), 82);
        assert_eq!(coordinate.raw_code(), "0120182");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let coordinate = IsoCoordinate::parse("  0450104 ").unwrap();
        assert_eq!(coordinate.bay(), 45);
        assert_eq!(coordinate.raw_code(), "0450104");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let error = IsoCoordinate::parse("120182").unwrap_err();
        assert!(matches!(error, Error::InvalidCoordinate { ref raw, .. } if raw == "120182"));

        assert!(IsoCoordinate::parse("01201820").is_err());
        assert!(IsoCoordinate::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert!(IsoCoordinate::parse("01A0182").is_err());
        assert!(IsoCoordinate::parse("-120182").is_err());
        assert!(IsoCoordinate::parse("012 182").is_err());
    }

    #[test]
    fn test_try_parse_and_is_valid_agree() {
        let samples = [
            "0120182", "9999999", "0000000", "120182", "ABCDEFG", " 0010101", "01201 2", "",
            "00101010", "٠١٢٠١٨٢",
        ];
        for sample in samples {
            assert_eq!(
                IsoCoordinate::is_valid(sample),
                IsoCoordinate::try_parse(sample).is_some(),
                "disagreement on {:?}",
                sample
            );
        }
    }

    #[test]
    fn test_format_round_trip() {
        for code in ["0000000", "0010101", "0120182", "0450104", "9999999", "1009990"] {
            assert_eq!(IsoCoordinate::parse(code).unwrap().format(), code);
        }
    }

    #[test]
    fn test_from_values_round_trip() {
        for (bay, row, tier) in [(0, 0, 0), (1, 2, 82), (999, 99, 99), (45, 10, 6)] {
            let coordinate = IsoCoordinate::from_values(bay, row, tier).unwrap();
            let reparsed = IsoCoordinate::parse(&coordinate.format()).unwrap();
            assert_eq!(reparsed, coordinate);
            assert_eq!(reparsed.raw_code(), coordinate.raw_code());
        }
    }

    #[test]
    fn test_from_values_reports_first_out_of_range_component() {
        let error = IsoCoordinate::from_values(1000, 100, 100).unwrap_err();
        assert!(matches!(
            error,
            Error::CoordinateOutOfRange { component: "bay", value: 1000, max: 999 }
        ));

        let error = IsoCoordinate::from_values(10, 100, 100).unwrap_err();
        assert!(matches!(error, Error::CoordinateOutOfRange { component: "row", .. }));

        let error = IsoCoordinate::from_values(10, 10, 100).unwrap_err();
        assert!(matches!(error, Error::CoordinateOutOfRange { component: "tier", .. }));
    }

    #[test]
    fn test_equality_ignores_raw_code() {
        let parsed = IsoCoordinate::parse(" 0120182").unwrap();
        let built = IsoCoordinate::from_values(12, 1, 82).unwrap();
        assert_eq!(parsed, built);
        assert_ne!(parsed, IsoCoordinate::from_values(12, 1, 84).unwrap());
    }

    #[test]
    fn test_slot_key_and_deck() {
        let on_deck = IsoCoordinate::parse("0120182").unwrap();
        assert_eq!(on_deck.slot_key(), "0182");
        assert!(on_deck.is_on_deck());

        let below = IsoCoordinate::parse("0120006").unwrap();
        assert_eq!(below.slot_key(), "0006");
        assert!(!below.is_on_deck());
    }

    #[test]
    fn test_serde_validates_components() {
        let coordinate = IsoCoordinate::parse("0120182").unwrap();
        let json = serde_json::to_string(&coordinate).unwrap();
        let decoded: IsoCoordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, coordinate);
        assert_eq!(decoded.raw_code(), "0120182");

        let out_of_range = r#"{"bay":12,"row":150,"tier":82}"#;
        assert!(serde_json::from_str::<IsoCoordinate>(out_of_range).is_err());

        let mismatched = r#"{"bay":12,"row":1,"tier":82,"raw_code":"0130182"}"#;
        assert!(serde_json::from_str::<IsoCoordinate>(mismatched).is_err());
    }
}

//! Application constants for the BAPLIE processor
//!
//! This module contains the EDIFACT delimiters, segment tags, qualifier codes
//! and default values used throughout the parser. Code-to-enum mapping tables
//! live next to the enums they populate in [`crate::app::models`].

// =============================================================================
// EDIFACT Delimiters
// =============================================================================

/// Segment terminator
pub const SEGMENT_TERMINATOR: char = '\'';

/// Data element separator
pub const ELEMENT_SEPARATOR: char = '+';

/// Component (sub-element) separator
pub const COMPONENT_SEPARATOR: char = ':';

/// Release character. Recognised by EDIFACT but not interpreted by the tokenizer.
pub const RELEASE_CHARACTER: char = '?';

// =============================================================================
// Segment Tags
// =============================================================================

/// Segment tags that appear in BAPLIE 2.2.1 messages
pub mod segment_tags {
    /// Interchange header
    pub const UNB: &str = "UNB";
    /// Message header
    pub const UNH: &str = "UNH";
    /// Beginning of message
    pub const BGM: &str = "BGM";
    /// Date/time/period
    pub const DTM: &str = "DTM";
    /// Reference
    pub const RFF: &str = "RFF";
    /// Name and address
    pub const NAD: &str = "NAD";
    /// Details of transport
    pub const TDT: &str = "TDT";
    /// Place/location identification
    pub const LOC: &str = "LOC";
    /// Measurements
    pub const MEA: &str = "MEA";
    /// Temperature
    pub const TMP: &str = "TMP";
    /// Equipment details
    pub const EQD: &str = "EQD";
    /// Dangerous goods
    pub const DGS: &str = "DGS";
    /// Message trailer
    pub const UNT: &str = "UNT";
    /// Interchange trailer
    pub const UNZ: &str = "UNZ";
}

// =============================================================================
// Qualifier Codes
// =============================================================================

/// TDT transport stage qualifiers (data element 8051)
pub mod transport_qualifiers {
    /// Main-carriage transport
    pub const MAIN_CARRIAGE: &str = "20";
}

/// Code list qualifiers used inside the TDT transport identification (C222)
pub mod vessel_code_lists {
    /// Call sign directory
    pub const CALL_SIGN: &str = "103";
    /// Lloyd's register / IMO number
    pub const IMO_NUMBER: &str = "146";
}

/// LOC place qualifiers (data element 3227)
pub mod location_qualifiers {
    /// Place of departure (voyage level)
    pub const PORT_OF_DEPARTURE: &str = "5";
    /// Place of loading
    pub const PLACE_OF_LOADING: &str = "9";
    /// Place of discharge
    pub const PLACE_OF_DISCHARGE: &str = "11";
    /// Next port of call (voyage level)
    pub const NEXT_PORT_OF_CALL: &str = "61";
    /// Place of delivery (final destination)
    pub const PLACE_OF_DELIVERY: &str = "83";
    /// Stowage cell
    pub const STOWAGE_CELL: &str = "147";
}

/// DTM date/time qualifiers (data element 2005)
pub mod date_qualifiers {
    /// Document/message date/time
    pub const MESSAGE_DATE: &str = "137";
}

/// RFF reference qualifiers (data element 1153)
pub mod reference_qualifiers {
    /// Vessel name
    pub const VESSEL_NAME: &str = "VM";
}

/// NAD party qualifiers (data element 3035)
pub mod party_qualifiers {
    /// Carrier
    pub const CARRIER: &str = "CA";
}

/// EQD equipment qualifiers (data element 8053)
pub mod equipment_qualifiers {
    /// Container
    pub const CONTAINER: &str = "CN";
}

/// EQD full/empty indicator codes (data element 8169)
pub mod equipment_status {
    /// Empty
    pub const EMPTY: &str = "4";
    /// Full
    pub const FULL: &str = "5";
}

/// MEA measurement qualifiers, both the dimension (6311) and attribute (6313) layouts
pub mod measurement_qualifiers {
    /// Weight (BAPLIE 2.x gross weight)
    pub const WEIGHT: &str = "WT";
    /// Gross weight
    pub const GROSS: &str = "G";
    /// Verified gross mass
    pub const VERIFIED_GROSS_MASS: &str = "VGM";
    /// Tare weight
    pub const TARE: &str = "T";
}

/// TMP temperature unit codes (data element 6411)
pub mod temperature_units {
    /// Degrees Celsius
    pub const CELSIUS: &str = "CEL";
    /// Degrees Fahrenheit
    pub const FAHRENHEIT: &str = "FAH";
}

// =============================================================================
// Parsing Defaults
// =============================================================================

/// Voyage number used when the TDT segment carries none
pub const UNKNOWN_VOYAGE: &str = "UNKNOWN";

/// Length of a formatted ISO 9711 stowage coordinate (BBBRRTT)
pub const COORDINATE_LENGTH: usize = 7;

/// Largest bay number a coordinate can carry
pub const MAX_BAY: u16 = 999;

/// Largest row number a coordinate can carry
pub const MAX_ROW: u8 = 99;

/// Largest tier number a coordinate can carry
pub const MAX_TIER: u8 = 99;

/// Tiers numbered from here upwards are on deck (ISO 9711 convention)
pub const ON_DECK_TIER_START: u8 = 80;

/// Gross weight above which a container counts as heavy for slot restrictions (kg)
pub const HEAVY_CONTAINER_THRESHOLD_KG: f64 = 30_000.0;

/// Prefix for generated container unit identifiers
pub const UNIT_ID_PREFIX: &str = "U";

// =============================================================================
// Processing Configuration Defaults
// =============================================================================

/// File patterns treated as BAPLIE documents when scanning directories
pub const DEFAULT_FILE_PATTERNS: &[&str] = &["*.edi", "*.baplie", "*.txt"];

/// Default log level when no verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "baplie-processor";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the worker count
pub const ENV_WORKERS: &str = "BAPLIE_WORKERS";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "BAPLIE_LOG_LEVEL";

/// Default number of documents parsed concurrently
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}

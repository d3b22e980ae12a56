//! BAPLIE Processor Library
//!
//! A Rust library for turning BAPLIE 2.2.1 stowage plans (the EDIFACT message
//! shipping lines use to describe where every container sits on a vessel)
//! into a structured, queryable voyage model.
//!
//! This library provides tools for:
//! - Tokenizing raw EDIFACT text into segments, elements and components
//! - Extracting vessel identity, voyage number and message metadata
//! - Grouping the segments that describe one container, whatever order the sender used
//! - Encoding and decoding ISO 9711 stowage coordinates (bay, row, tier)
//! - Aggregating containers into per-bay plans with slot maps
//!
//! ```rust
//! let text = "UNH+1+BAPLIE:D:95B:UN:SMDG22'\
//!             TDT+20+V001+++MSK:172:20+++9V1234:103::VESSEL MAYA'\
//!             LOC+147+0120182::5'EQD+CN+MSKU1234567+22G1+++5'MEA+WT++KGM:25000'\
//!             UNT+5+1'";
//! let voyage = baplie_processor::parse(text).unwrap();
//! assert_eq!(voyage.vessel.name, "VESSEL MAYA");
//! assert_eq!(voyage.containers_in_bay(12).len(), 1);
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod baplie_parser;
        pub mod bay_aggregator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    BaplieMetadata, Bay, ContainerSlot, ContainerStatus, ContainerUnit, Direction, IsoCoordinate,
    SlotRestriction, Vessel, VesselVoyage,
};
pub use app::services::baplie_parser::{BaplieParser, ParseResult, ParseStats};
pub use config::{Config, ParserConfig};

/// Parse a BAPLIE document with the default parser configuration
///
/// This is the single entry point collaborators need: raw text in, either a
/// complete voyage or a typed failure out.
pub fn parse(text: &str) -> Result<VesselVoyage> {
    BaplieParser::default().parse(text)
}

/// Result type alias for the BAPLIE processor
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The document as a whole is unusable (empty, no segments)
    Structural,
    /// The document is well formed but lacks mandatory content
    Semantic,
    /// A single field failed validation
    FieldValidation,
    /// Failures outside the document itself (I/O, configuration, output)
    Environment,
}

/// Error types for BAPLIE processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input was empty or whitespace only
    #[error("Empty document: no BAPLIE content to parse")]
    EmptyDocument,

    /// Input produced no segments after tokenization
    #[error("No valid segments found in document")]
    NoValidSegments,

    /// Vessel identity could not be recovered
    #[error("Missing vessel: no vessel name found in {segment} segment")]
    MissingVessel { segment: String },

    /// Stowage coordinate has the wrong shape
    #[error("Invalid coordinate '{raw}': {reason}")]
    InvalidCoordinate { raw: String, reason: String },

    /// Stowage coordinate component outside its range
    #[error("Coordinate {component} {value} out of range (0-{max})")]
    CoordinateOutOfRange {
        component: &'static str,
        value: u32,
        max: u32,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Output serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an empty document error
    pub fn empty_document() -> Self {
        Self::EmptyDocument
    }

    /// Create a no valid segments error
    pub fn no_valid_segments() -> Self {
        Self::NoValidSegments
    }

    /// Create a missing vessel error naming the segment that should have carried it
    pub fn missing_vessel(segment: impl Into<String>) -> Self {
        Self::MissingVessel {
            segment: segment.into(),
        }
    }

    /// Create an invalid coordinate error
    pub fn invalid_coordinate(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Create a coordinate out of range error
    pub fn coordinate_out_of_range(component: &'static str, value: u32, max: u32) -> Self {
        Self::CoordinateOutOfRange {
            component,
            value,
            max,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDocument | Self::NoValidSegments => ErrorKind::Structural,
            Self::MissingVessel { .. } => ErrorKind::Semantic,
            Self::InvalidCoordinate { .. } | Self::CoordinateOutOfRange { .. } => {
                ErrorKind::FieldValidation
            }
            Self::Configuration { .. }
            | Self::Io { .. }
            | Self::Serialization { .. }
            | Self::ProcessingInterrupted { .. } => ErrorKind::Environment,
        }
    }

    /// Segment type the failure relates to, where one is known
    pub fn segment_type(&self) -> Option<&str> {
        match self {
            Self::MissingVessel { segment } => Some(segment),
            Self::InvalidCoordinate { .. } | Self::CoordinateOutOfRange { .. } => {
                Some(constants::segment_tags::LOC)
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML configuration: {}", error),
        }
    }
}

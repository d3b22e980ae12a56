//! BAPLIE parser for EDIFACT stowage plan messages
//!
//! This module turns the raw text of a BAPLIE 2.2.1 message into a
//! [`VesselVoyage`](crate::app::models::VesselVoyage). Parsing is lenient:
//! only an empty document, a document without segments, or a missing vessel
//! identity abort the parse. Anything else that cannot be read is left out.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`tokenizer`] - Segment/element/component splitting
//! - [`field_parsers`] - Bounds-checked field access and value decoding
//! - [`header`] - Message envelope metadata (UNB, UNH, BGM, DTM)
//! - [`vessel`] - Vessel identity and voyage number (TDT, RFF+VM)
//! - [`container_group`] - Assembly of container records across segments
//! - [`parser`] - Orchestration and voyage assembly
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use baplie_processor::app::services::baplie_parser::BaplieParser;
//!
//! # fn example(text: &str) -> baplie_processor::Result<()> {
//! let parser = BaplieParser::default();
//! let result = parser.parse_with_stats(text)?;
//!
//! println!("Parsed {} containers from {} segments",
//!          result.stats.containers_parsed,
//!          result.stats.total_segments);
//! # Ok(())
//! # }
//! ```

pub mod container_group;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod stats;
pub mod tokenizer;
pub mod vessel;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::BaplieParser;
pub use stats::{ParseResult, ParseStats};
pub use tokenizer::Segment;

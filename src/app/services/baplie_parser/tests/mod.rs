//! Test utilities for BAPLIE parser testing
//!
//! This module provides fixture documents and helper functions used across
//! the parser test modules.

use crate::app::services::baplie_parser::tokenizer::{Segment, tokenize};
use crate::config::Delimiters;

mod vessel_tests;

/// Tokenize a single segment with the default delimiters
pub fn segment(raw: &str) -> Segment {
    Segment::parse(raw, &Delimiters::default())
}

/// Tokenize a document with the default delimiters
pub fn segments(text: &str) -> Vec<Segment> {
    tokenize(text, &Delimiters::default())
}

/// Envelope and transport segments shared by the fixture documents
pub fn document_header() -> String {
    r#"UNB+UNOA:2+SENDERID+RECEIVERID+240301:1430+REF0001'
UNH+MSG001+BAPLIE:D:95B:UN:SMDG22'
BGM++DOC12345+9'
DTM+137:202403011430:203'
TDT+20+V001+++MSK:172:20+++9V1234:103::VESSEL MAYA:DK'
LOC+5+NLRTM:139:6'
LOC+61+DEHAM:139:6'"#
        .to_string()
}

/// Wrap container groups in a complete message
pub fn document_with_groups(groups: &[&str]) -> String {
    let mut text = document_header();
    for group in groups {
        text.push('\n');
        text.push_str(group);
    }
    text.push_str("\nUNT+99+MSG001'\nUNZ+1+REF0001'");
    text
}

/// Complete sample document with three containers in bays 12 and 14
pub fn create_sample_baplie() -> String {
    document_with_groups(&[
        // Weights before the equipment segment
        "LOC+147+0120182::5'MEA+WT++KGM:25000'MEA+VGM++KGM:25500'LOC+9+NLRTM'LOC+11+DEHAM'\
         EQD+CN+MSKU1234567+22G1+++5'NAD+CA+MSK:172:20'",
        // Reefer
        "LOC+147+0120284::5'MEA+WT++KGM:18000'LOC+9+NLRTM'LOC+11+GBFXT'\
         EQD+CN+MSKU7654321+45R1+++5'NAD+CA+MSK:172:20'TMP+2+-18.5:CEL'",
        // Weights after the equipment segment, hazardous
        "LOC+147+0140006::5'LOC+9+NLRTM'LOC+11+DEHAM'EQD+CN+TGHU0000001+22G1+++5'\
         MEA+AAE+VGM+KGM:21000'DGS+IMD+3+1203'",
    ])
}

/// The two-container VESSEL MAYA plan used by the acceptance scenarios
pub fn create_vessel_maya_baplie() -> String {
    document_with_groups(&[
        "LOC+147+0120182::5'EQD+CN+MAYU0000001+22G1+++5'MEA+WT++KGM:25000'MEA+VGM++KGM:25500'",
        "LOC+147+0120284::5'EQD+CN+MAYU0000002+45R1+++5'",
    ])
}

//! Tests for vessel and voyage identification

use super::super::vessel::{
    extract_voyage_header, is_main_carriage, vessel_from_transport, vessel_name_from_reference,
};
use super::{create_sample_baplie, segment, segments};
use crate::config::ParserConfig;
use crate::{Error, ErrorKind};

#[test]
fn test_vessel_from_main_carriage() {
    let header = extract_voyage_header(&segments(&create_sample_baplie()), &ParserConfig::default())
        .unwrap();

    assert_eq!(header.vessel.name, "VESSEL MAYA");
    assert_eq!(header.vessel.call_sign, Some("9V1234".to_string()));
    assert_eq!(header.vessel.imo_number, None);
    assert_eq!(header.vessel.flag, Some("DK".to_string()));
    assert_eq!(header.vessel.operator, Some("MSK".to_string()));
    assert_eq!(header.voyage_number, "V001");
    assert_eq!(header.origin_port, Some("NLRTM".to_string()));
    assert_eq!(header.destination_port, Some("DEHAM".to_string()));
}

#[test]
fn test_imo_number_code_list() {
    let vessel =
        vessel_from_transport(&segment("TDT+20+V1+++CMA:172:20+++9321483:146:11:CMA CGM TEST"));

    assert_eq!(vessel.name, "CMA CGM TEST");
    assert_eq!(vessel.imo_number, Some("9321483".to_string()));
    assert_eq!(vessel.call_sign, None);
    assert_eq!(vessel.flag, None);
}

#[test]
fn test_vessel_name_falls_back_to_first_component() {
    let vessel = vessel_from_transport(&segment("TDT+20+V002++++++VESSEL ONLY"));

    assert_eq!(vessel.name, "VESSEL ONLY");
    assert_eq!(vessel.operator, None);
    assert_eq!(vessel.call_sign, None);
}

#[test]
fn test_only_main_carriage_transport_is_used() {
    let result = segments("TDT+10+F01++++++FEEDER'TDT+20+M01++++++MAIN'TDT+20+M02++++++OTHER'");

    assert!(!is_main_carriage(&result[0]));
    assert!(is_main_carriage(&result[1]));

    let header = extract_voyage_header(&result, &ParserConfig::default()).unwrap();
    assert_eq!(header.vessel.name, "MAIN");
    assert_eq!(header.voyage_number, "M01");
}

#[test]
fn test_reference_fallback_without_transport() {
    let result = segments("UNH+1+BAPLIE'RFF+BM:1'RFF+VM:OCEAN STAR'LOC+147+0120182'");

    let header = extract_voyage_header(&result, &ParserConfig::default()).unwrap();

    assert_eq!(header.vessel.name, "OCEAN STAR");
    assert_eq!(header.voyage_number, "UNKNOWN");
    assert_eq!(vessel_name_from_reference(&result), Some("OCEAN STAR".to_string()));
}

#[test]
fn test_reference_fallback_when_transport_has_no_name() {
    let result = segments("TDT+20+V009'RFF+VM:NORTHERN LIGHT'");

    let header = extract_voyage_header(&result, &ParserConfig::default()).unwrap();

    assert_eq!(header.vessel.name, "NORTHERN LIGHT");
    assert_eq!(header.voyage_number, "V009");
}

#[test]
fn test_missing_vessel_names_transport_segment() {
    let result = segments("UNH+1+BAPLIE'LOC+147+0120182'EQD+CN+ABCU1234567'");

    let error = extract_voyage_header(&result, &ParserConfig::default()).unwrap_err();

    assert!(matches!(error, Error::MissingVessel { .. }));
    assert_eq!(error.kind(), ErrorKind::Semantic);
    assert_eq!(error.segment_type(), Some("TDT"));
}

#[test]
fn test_missing_voyage_uses_configured_sentinel() {
    let result = segments("TDT+20+++++++:103::NO VOYAGE'");
    let config = ParserConfig::default().with_unknown_voyage("TBA");

    let header = extract_voyage_header(&result, &config).unwrap();

    assert_eq!(header.vessel.name, "NO VOYAGE");
    assert_eq!(header.voyage_number, "TBA");
    assert_eq!(header.vessel.call_sign, None);
}

#[test]
fn test_voyage_ports_absent() {
    let result = segments("TDT+20+V1++++++SHIP'LOC+9+NLRTM'LOC+11+DEHAM'");

    let header = extract_voyage_header(&result, &ParserConfig::default()).unwrap();

    assert_eq!(header.origin_port, None);
    assert_eq!(header.destination_port, None);
}

//! Integration tests for the BAPLIE parser with fixture documents
//!
//! These tests drive the public API end to end with complete stowage plan
//! files from `tests/data/`.

use baplie_processor::app::models::{ContainerStatus, Direction, TemperatureUnit};
use baplie_processor::{
    BaplieParser, Error, ErrorKind, ParserConfig, VesselVoyage, parse,
};
use chrono::NaiveDate;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

fn vessel_maya() -> VesselVoyage {
    parse(&fixture("vessel_maya.edi")).expect("vessel_maya.edi should parse")
}

/// Vessel, voyage and envelope details come from the header segments
#[test]
fn test_vessel_and_voyage_header() {
    let voyage = vessel_maya();

    assert_eq!(voyage.vessel.name, "VESSEL MAYA");
    assert_eq!(voyage.vessel.call_sign.as_deref(), Some("9V1234"));
    assert_eq!(voyage.vessel.flag.as_deref(), Some("DK"));
    assert_eq!(voyage.vessel.operator.as_deref(), Some("MSK"));
    assert_eq!(voyage.voyage_number, "V001");
    assert_eq!(voyage.origin_port.as_deref(), Some("NLRTM"));
    assert_eq!(voyage.destination_port.as_deref(), Some("DEHAM"));
    assert_eq!(voyage.direction, Direction::Unknown);

    let metadata = voyage.metadata.as_ref().expect("metadata present");
    assert_eq!(metadata.sender.as_deref(), Some("MAEU"));
    assert_eq!(metadata.recipient.as_deref(), Some("NLRTMECT"));
    assert_eq!(metadata.message_reference.as_deref(), Some("MAYA0117"));
    assert_eq!(metadata.version.as_deref(), Some("D:95B:UN:SMDG22"));
    assert_eq!(metadata.document_number.as_deref(), Some("0117V001"));

    let expected_date = NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(14, 30, 0));
    assert_eq!(metadata.prepared_at, expected_date);
    assert_eq!(voyage.message_date, expected_date);
}

/// Every container group becomes one record, in document order
#[test]
fn test_container_records() {
    let voyage = vessel_maya();

    let ids: Vec<&str> = voyage
        .containers
        .iter()
        .map(|c| c.container_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "MSKU1234567",
            "MSKU7654321",
            "TGHU0000001",
            "MSKU0000011",
            "MRKU2222222",
            "MSKU3333333",
        ]
    );
    assert_eq!(voyage.containers[5].id, "U00006");

    let first = &voyage.containers[0];
    assert_eq!(first.gross_weight, Some(25000.0));
    assert_eq!(first.vgm_weight, Some(25500.0));
    assert_eq!(first.load_port.as_deref(), Some("NLRTM"));
    assert_eq!(first.discharge_port.as_deref(), Some("DEHAM"));
    assert_eq!(first.operator_code.as_deref(), Some("MSK"));

    let reefer = voyage.find_container("MSKU7654321").unwrap();
    assert_eq!(reefer.destination_port.as_deref(), Some("GBLON"));
    let settings = reefer.reefer.as_ref().unwrap();
    assert_eq!(settings.temperature, Some(-18.5));
    assert_eq!(settings.unit, TemperatureUnit::Celsius);

    let hazardous = voyage.find_container("TGHU0000001").unwrap();
    let hazard = hazardous.hazard.as_ref().unwrap();
    assert_eq!(hazard.imdg_class.as_deref(), Some("3"));
    assert_eq!(hazard.un_number.as_deref(), Some("1203"));
    assert_eq!(hazardous.vgm_weight, Some(21000.0));
    assert_eq!(hazardous.operator_code.as_deref(), Some("CMA"));

    let empty = voyage.find_container("MSKU0000011").unwrap();
    assert_eq!(empty.status, ContainerStatus::Empty);

    let heavy = voyage.find_container("MRKU2222222").unwrap();
    assert_eq!(heavy.tare_weight, Some(3900.0));
    assert_eq!(heavy.net_weight(), Some(26600.0));
}

/// Bays hold exactly the stowed containers, each in the bay of its coordinate
#[test]
fn test_bay_aggregation() {
    let voyage = vessel_maya();

    assert_eq!(voyage.bays.keys().copied().collect::<Vec<_>>(), vec![12, 13, 14]);
    assert_eq!(voyage.containers_in_bay(12).len(), 3);
    assert_eq!(voyage.containers_in_bay(13).len(), 1);
    assert_eq!(voyage.containers_in_bay(14).len(), 1);
    assert!(voyage.containers_in_bay(20).is_empty());

    let stowed: usize = voyage.bays.values().map(|bay| bay.container_count()).sum();
    assert_eq!(stowed, voyage.total_containers() - voyage.unstowed_containers().len());

    for (number, bay) in &voyage.bays {
        assert_eq!(bay.bay_number, *number);
        assert_eq!(bay.is_40ft_bay, number % 2 == 0);
        for container in &bay.containers {
            assert_eq!(container.bay(), Some(*number));
        }
    }

    let bay = voyage.bay(12).unwrap();
    assert_eq!(bay.on_deck_count(), 2);
    assert_eq!(bay.below_deck_count(), 1);
    assert_eq!(bay.total_weight(), 43000.0);
    assert_eq!(
        bay.slot(0, 6).and_then(|s| s.container_id.as_deref()),
        Some("TGHU0000001")
    );
}

/// Malformed positions and unnamed equipment are skipped without failing
#[test]
fn test_anomalies_are_counted() {
    let result = BaplieParser::default()
        .parse_with_stats(&fixture("vessel_maya.edi"))
        .unwrap();

    assert_eq!(result.stats.stowage_groups, 7);
    assert_eq!(result.stats.containers_parsed, 6);
    assert_eq!(result.stats.containers_unstowed, 1);
    assert_eq!(result.stats.invalid_coordinates, 1);
    assert_eq!(result.stats.equipment_dropped, 1);
    assert!(result.stats.has_anomalies());

    let unstowed = result.voyage.unstowed_containers();
    assert_eq!(unstowed.len(), 1);
    assert_eq!(unstowed[0].container_id, "MSKU3333333");
}

#[test]
fn test_voyage_queries() {
    let voyage = vessel_maya();

    assert_eq!(voyage.full_containers(), 5);
    assert_eq!(voyage.empty_containers(), 1);
    assert_eq!(voyage.total_gross_weight(), 87700.0);
    assert_eq!(voyage.total_vgm_weight(), 46500.0);
    assert_eq!(voyage.containers_for_discharge("DEHAM").len(), 4);
    assert_eq!(voyage.containers_for_discharge("GBFXT").len(), 2);
    assert_eq!(voyage.discharge_ports(), vec!["DEHAM", "GBFXT"]);
    assert_eq!(voyage.hazardous_containers().len(), 1);
    assert_eq!(voyage.reefer_containers().len(), 1);
    assert!(voyage.find_container("NOPE0000000").is_none());
}

/// Containers between a message trailer and the next header are ignored
#[test]
fn test_multi_message_interchange() {
    let result = BaplieParser::default()
        .parse_with_stats(&fixture("multi_message.edi"))
        .unwrap();
    let voyage = &result.voyage;

    assert_eq!(voyage.vessel.name, "NORDIC STAR");
    assert_eq!(voyage.vessel.imo_number.as_deref(), Some("9321483"));
    assert_eq!(voyage.vessel.call_sign, None);
    assert_eq!(voyage.vessel.flag.as_deref(), Some("SG"));
    assert_eq!(voyage.voyage_number, "V042");

    let ids: Vec<&str> = voyage.containers.iter().map(|c| c.container_id.as_str()).collect();
    assert_eq!(ids, vec!["ABCU1000001", "ABCU1000002"]);
    assert_eq!(voyage.containers[0].discharge_port.as_deref(), Some("DEHAM"));
    assert_eq!(voyage.containers[1].discharge_port.as_deref(), Some("BEANR"));
    assert_eq!(result.stats.segments_outside_message, 2);

    assert_eq!(
        voyage.message_date,
        NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(0, 0, 0))
    );
    assert_eq!(
        voyage.metadata.as_ref().and_then(|m| m.message_reference.as_deref()),
        Some("M1")
    );
}

#[test]
fn test_vessel_name_from_reference() {
    let voyage = parse(&fixture("reference_vessel.edi")).unwrap();

    assert_eq!(voyage.vessel.name, "OCEAN STAR");
    assert_eq!(voyage.voyage_number, "UNKNOWN");
    assert_eq!(voyage.containers_in_bay(5).len(), 1);
    assert!(voyage.containers[0].is_empty());
}

#[test]
fn test_missing_vessel_fails() {
    let error = parse(&fixture("no_vessel.edi")).unwrap_err();

    assert!(matches!(error, Error::MissingVessel { .. }));
    assert_eq!(error.kind(), ErrorKind::Semantic);
    assert_eq!(error.segment_type(), Some("TDT"));
}

#[test]
fn test_empty_file_fails() {
    let error = parse(&fixture("empty.edi")).unwrap_err();

    assert!(matches!(error, Error::EmptyDocument));
    assert_eq!(error.kind(), ErrorKind::Structural);
}

#[test]
fn test_configured_parser() {
    let config = ParserConfig::default()
        .with_direction(Direction::Import)
        .with_unknown_voyage("TBA");
    let voyage = BaplieParser::new(config)
        .parse(&fixture("reference_vessel.edi"))
        .unwrap();

    assert_eq!(voyage.direction, Direction::Import);
    assert_eq!(voyage.voyage_number, "TBA");
}

/// Single-line and one-segment-per-line layouts parse identically
#[test]
fn test_line_layout_does_not_matter() {
    let text = fixture("vessel_maya.edi");
    let single_line: String = text.lines().collect();

    assert_eq!(parse(&single_line).unwrap(), parse(&text).unwrap());
}

#[test]
fn test_json_round_trip() {
    let voyage = vessel_maya();

    let json = serde_json::to_string_pretty(&voyage).unwrap();
    let restored: VesselVoyage = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, voyage);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["vessel"]["name"], "VESSEL MAYA");
    assert!(value["bays"]["12"]["slots"]["0182"].is_object());
    assert_eq!(value["containers"][0]["status"], "Full");
    // Absent optionals are omitted
    assert!(value["containers"][0].get("reefer").is_none());
}

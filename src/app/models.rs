//! Data models for BAPLIE processing
//!
//! This module contains the value types produced by the parser: stowage
//! coordinates, container units, bays with their slot maps, and the voyage
//! aggregate that ties them together. Every type is created by a single parse
//! pass and treated as read-only afterwards; changes go through `with_*`
//! methods that return new values.
//!
//! All types serialize with `serde`: optional fields are omitted when absent,
//! enums are written by variant name, and maps are keyed by their natural
//! identifier (bay number, "row+tier" slot key).

pub mod bay;
pub mod container;
pub mod coordinate;
pub mod voyage;

pub use bay::{Bay, ContainerSlot, SlotRestriction};
pub use container::{
    ContainerKind, ContainerStatus, ContainerUnit, HazardInfo, HeightClass, ReeferSettings,
    TemperatureUnit, WeightKind,
};
pub use coordinate::IsoCoordinate;
pub use voyage::{BaplieMetadata, Direction, Vessel, VesselVoyage};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn create_test_voyage() -> VesselVoyage {
        let first = ContainerUnit::new("U00001", "MSKU1234567")
            .with_iso_type("22G1")
            .with_status(ContainerStatus::Full)
            .with_coordinate(IsoCoordinate::parse("0120182").unwrap())
            .with_weight(WeightKind::Gross, 25_000.0)
            .with_weight(WeightKind::VerifiedGrossMass, 25_500.0);
        let second = ContainerUnit::new("U00002", "MSKU7654321")
            .with_iso_type("45R1")
            .with_status(ContainerStatus::Empty)
            .with_coordinate(IsoCoordinate::parse("0120284").unwrap())
            .with_reefer(ReeferSettings {
                temperature: Some(-18.5),
                unit: TemperatureUnit::Celsius,
            });
        let loose = ContainerUnit::new("U00003", "TGHU0000001");

        let mut bay = Bay::new(12);
        for container in [&first, &second] {
            let coordinate = container.coordinate.clone().unwrap();
            bay.slots.insert(
                coordinate.slot_key(),
                ContainerSlot::occupied_by(coordinate.row(), coordinate.tier(), container),
            );
            bay.containers.push(container.clone());
        }

        let mut bays = BTreeMap::new();
        bays.insert(12, bay);

        VesselVoyage {
            vessel: Vessel {
                name: "VESSEL MAYA".to_string(),
                imo_number: Some("9321483".to_string()),
                call_sign: None,
                flag: Some("DK".to_string()),
                operator: Some("MSK".to_string()),
            },
            voyage_number: "V001".to_string(),
            direction: Direction::Export,
            origin_port: Some("NLRTM".to_string()),
            destination_port: None,
            message_date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|d| d.and_hms_opt(14, 30, 0)),
            containers: vec![first, second, loose],
            bays,
            metadata: Some(BaplieMetadata {
                message_reference: Some("MSG001".to_string()),
                message_type: Some("BAPLIE".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_voyage_statistics_are_computed() {
        let voyage = create_test_voyage();
        assert_eq!(voyage.total_containers(), 3);
        assert_eq!(voyage.full_containers(), 1);
        assert_eq!(voyage.empty_containers(), 1);
        assert_eq!(voyage.total_gross_weight(), 25_000.0);
        assert_eq!(voyage.total_vgm_weight(), 25_500.0);
        assert_eq!(voyage.unstowed_containers().len(), 1);
    }

    #[test]
    fn test_containers_in_bay() {
        let voyage = create_test_voyage();
        assert_eq!(voyage.containers_in_bay(12).len(), 2);
        assert!(voyage.containers_in_bay(14).is_empty());

        let bay = voyage.bay(12).unwrap();
        assert_eq!(bay.occupancy(), 2);
        assert_eq!(bay.on_deck_count(), 2);
        assert_eq!(bay.rows(), vec![1, 2]);
        assert_eq!(bay.tiers(), vec![82, 84]);
    }

    #[test]
    fn test_queries() {
        let voyage = create_test_voyage();
        assert!(voyage.find_container("msku1234567").is_some());
        assert!(voyage.find_container("NOPE0000000").is_none());
        assert_eq!(voyage.reefer_containers().len(), 1);
        assert!(voyage.hazardous_containers().is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let voyage = create_test_voyage();
        let json = serde_json::to_string(&voyage).unwrap();
        let decoded: VesselVoyage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, voyage);
    }

    #[test]
    fn test_serde_shape() {
        let voyage = create_test_voyage();
        let value = serde_json::to_value(&voyage).unwrap();

        // Bays keyed by bay number as a string, slots by row+tier
        assert!(value["bays"]["12"]["slots"]["0182"].is_object());
        assert_eq!(value["direction"], "Export");
        assert!(value.get("destination_port").is_none());
        assert!(value["vessel"].get("call_sign").is_none());
        assert!(value["metadata"].get("sender").is_none());
    }
}

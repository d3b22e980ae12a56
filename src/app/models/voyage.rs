//! Vessel identity, message metadata and the voyage aggregate

use super::{Bay, ContainerUnit};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vessel identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vessel {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub imo_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,

    /// Nationality of the vessel (flag state code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,

    /// Carrier operating the vessel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl Vessel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imo_number: None,
            call_sign: None,
            flag: None,
            operator: None,
        }
    }
}

/// Trade direction of the plan, from the receiving terminal's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Import,
    Export,
    #[default]
    Unknown,
}

/// Envelope information about the BAPLIE message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaplieMetadata {
    /// Message reference number (UNH)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<String>,

    /// Message type, normally "BAPLIE"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    /// Version, release, agency and association code (e.g. "D:95B:UN:SMDG22")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Document number (BGM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Interchange sender (UNB)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    /// Interchange recipient (UNB)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Message preparation time (DTM+137)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_at: Option<NaiveDateTime>,
}

/// Complete stowage plan for one vessel call
///
/// Built once per successful parse. Counts and weights are computed from the
/// container list on every call rather than stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselVoyage {
    pub vessel: Vessel,

    pub voyage_number: String,

    pub direction: Direction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_port: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_date: Option<NaiveDateTime>,

    pub containers: Vec<ContainerUnit>,

    /// Bays keyed by bay number
    pub bays: BTreeMap<u16, Bay>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BaplieMetadata>,
}

impl VesselVoyage {
    pub fn total_containers(&self) -> usize {
        self.containers.len()
    }

    pub fn full_containers(&self) -> usize {
        self.containers.iter().filter(|c| c.is_full()).count()
    }

    pub fn empty_containers(&self) -> usize {
        self.containers.iter().filter(|c| c.is_empty()).count()
    }

    /// Sum of known gross weights, in kilograms
    pub fn total_gross_weight(&self) -> f64 {
        self.containers.iter().filter_map(|c| c.gross_weight).sum()
    }

    /// Sum of known verified gross masses, in kilograms
    pub fn total_vgm_weight(&self) -> f64 {
        self.containers.iter().filter_map(|c| c.vgm_weight).sum()
    }

    /// Containers stowed in the given bay
    pub fn containers_in_bay(&self, bay_number: u16) -> &[ContainerUnit] {
        self.bays
            .get(&bay_number)
            .map(|bay| bay.containers.as_slice())
            .unwrap_or(&[])
    }

    pub fn bay(&self, bay_number: u16) -> Option<&Bay> {
        self.bays.get(&bay_number)
    }

    /// Look up a container by its carrier-assigned number
    pub fn find_container(&self, container_id: &str) -> Option<&ContainerUnit> {
        self.containers
            .iter()
            .find(|c| c.container_id.eq_ignore_ascii_case(container_id.trim()))
    }

    /// Containers to be discharged at the given port
    pub fn containers_for_discharge(&self, port: &str) -> Vec<&ContainerUnit> {
        self.containers
            .iter()
            .filter(|c| c.discharge_port.as_deref() == Some(port))
            .collect()
    }

    pub fn hazardous_containers(&self) -> Vec<&ContainerUnit> {
        self.containers.iter().filter(|c| c.is_hazardous()).collect()
    }

    pub fn reefer_containers(&self) -> Vec<&ContainerUnit> {
        self.containers.iter().filter(|c| c.is_reefer()).collect()
    }

    /// Containers without a stowage coordinate
    pub fn unstowed_containers(&self) -> Vec<&ContainerUnit> {
        self.containers
            .iter()
            .filter(|c| c.coordinate.is_none())
            .collect()
    }

    /// Distinct discharge ports, in order of first appearance
    pub fn discharge_ports(&self) -> Vec<&str> {
        let mut ports: Vec<&str> = Vec::new();
        for port in self.containers.iter().filter_map(|c| c.discharge_port.as_deref()) {
            if !ports.contains(&port) {
                ports.push(port);
            }
        }
        ports
    }
}

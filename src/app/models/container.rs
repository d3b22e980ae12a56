//! Container units and the code tables that describe them

use super::IsoCoordinate;
use crate::constants::{equipment_status, measurement_qualifiers, temperature_units};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Container Status
// =============================================================================

/// Full/empty indicator of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContainerStatus {
    Full,
    Empty,
    #[default]
    Unknown,
}

/// Wire code to status mapping for EQD data element 8169
pub const STATUS_CODE_TABLE: &[(&str, ContainerStatus)] = &[
    (equipment_status::FULL, ContainerStatus::Full),
    (equipment_status::EMPTY, ContainerStatus::Empty),
];

impl ContainerStatus {
    /// Look up a full/empty indicator code
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        STATUS_CODE_TABLE
            .iter()
            .find(|(wire, _)| *wire == code)
            .map(|(_, status)| *status)
    }
}

// =============================================================================
// Weights
// =============================================================================

/// Which weight a MEA segment carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightKind {
    Gross,
    VerifiedGrossMass,
    Tare,
}

/// Wire code to weight kind mapping for MEA qualifiers
pub const WEIGHT_QUALIFIER_TABLE: &[(&str, WeightKind)] = &[
    (measurement_qualifiers::WEIGHT, WeightKind::Gross),
    (measurement_qualifiers::GROSS, WeightKind::Gross),
    (measurement_qualifiers::VERIFIED_GROSS_MASS, WeightKind::VerifiedGrossMass),
    (measurement_qualifiers::TARE, WeightKind::Tare),
];

impl WeightKind {
    /// Look up a measurement qualifier
    pub fn from_qualifier(code: &str) -> Option<Self> {
        let code = code.trim();
        WEIGHT_QUALIFIER_TABLE
            .iter()
            .find(|(wire, _)| *wire == code)
            .map(|(_, kind)| *kind)
    }
}

// =============================================================================
// ISO Size/Type
// =============================================================================

/// Height class derived from the second character of an ISO size/type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeightClass {
    /// 8'0" to 9'0"
    Standard,
    /// 9'6" and taller
    HighCube,
    /// 4'3" and lower
    HalfHeight,
    Unknown,
}

/// Container kind derived from the third character of an ISO size/type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    General,
    Ventilated,
    Reefer,
    OpenTop,
    FlatRack,
    Tank,
    Bulk,
    Other,
}

/// Length code (first character) to length in feet
pub const SIZE_CODE_TABLE: &[(char, u32)] = &[
    ('1', 10),
    ('2', 20),
    ('3', 30),
    ('4', 40),
    ('L', 45),
    ('M', 48),
    ('P', 53),
];

/// Height code (second character) to height class
pub const HEIGHT_CODE_TABLE: &[(char, HeightClass)] = &[
    ('0', HeightClass::Standard),
    ('1', HeightClass::Standard),
    ('2', HeightClass::Standard),
    ('3', HeightClass::Standard),
    ('4', HeightClass::Standard),
    ('5', HeightClass::HighCube),
    ('6', HeightClass::HighCube),
    ('E', HeightClass::HighCube),
    ('F', HeightClass::HighCube),
    ('8', HeightClass::HalfHeight),
    ('9', HeightClass::HalfHeight),
];

/// Type code (third character) to container kind, covering both the
/// alphabetic ISO 6346:1995 groups and the older numeric groups
pub const KIND_CODE_TABLE: &[(char, ContainerKind)] = &[
    ('G', ContainerKind::General),
    ('0', ContainerKind::General),
    ('1', ContainerKind::General),
    ('V', ContainerKind::Ventilated),
    ('R', ContainerKind::Reefer),
    ('H', ContainerKind::Reefer),
    ('2', ContainerKind::Reefer),
    ('3', ContainerKind::Reefer),
    ('4', ContainerKind::Reefer),
    ('U', ContainerKind::OpenTop),
    ('5', ContainerKind::OpenTop),
    ('P', ContainerKind::FlatRack),
    ('6', ContainerKind::FlatRack),
    ('T', ContainerKind::Tank),
    ('7', ContainerKind::Tank),
    ('B', ContainerKind::Bulk),
    ('8', ContainerKind::Bulk),
];

fn lookup<T: Copy>(table: &[(char, T)], code: Option<char>) -> Option<T> {
    let code = code?.to_ascii_uppercase();
    table.iter().find(|(wire, _)| *wire == code).map(|(_, v)| *v)
}

/// Length in feet for an ISO size/type code
pub fn size_in_feet(iso_code: &str) -> Option<u32> {
    lookup(SIZE_CODE_TABLE, iso_code.trim().chars().next())
}

/// Height class for an ISO size/type code
pub fn height_class(iso_code: &str) -> HeightClass {
    lookup(HEIGHT_CODE_TABLE, iso_code.trim().chars().nth(1)).unwrap_or(HeightClass::Unknown)
}

/// Container kind for an ISO size/type code
pub fn container_kind(iso_code: &str) -> ContainerKind {
    lookup(KIND_CODE_TABLE, iso_code.trim().chars().nth(2)).unwrap_or(ContainerKind::Other)
}

// =============================================================================
// Hazard and Reefer Attributes
// =============================================================================

/// Dangerous goods classification of a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardInfo {
    /// IMDG class (e.g. "3", "2.1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdg_class: Option<String>,

    /// UN substance number (e.g. "1203")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub un_number: Option<String>,
}

/// Temperature unit of a reefer setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Wire code to unit mapping for TMP data element 6411
pub const TEMPERATURE_UNIT_TABLE: &[(&str, TemperatureUnit)] = &[
    (temperature_units::CELSIUS, TemperatureUnit::Celsius),
    (temperature_units::FAHRENHEIT, TemperatureUnit::Fahrenheit),
];

impl TemperatureUnit {
    /// Map a unit code, defaulting to Celsius when absent or unrecognised
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|code| {
            let code = code.trim();
            TEMPERATURE_UNIT_TABLE
                .iter()
                .find(|(wire, _)| *wire == code)
                .map(|(_, unit)| *unit)
        })
        .unwrap_or_default()
    }

    /// Display symbol for rendered temperatures
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// Reefer set point of a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReeferSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    pub unit: TemperatureUnit,
}

// =============================================================================
// Container Unit
// =============================================================================

/// One container as described by the stowage plan
///
/// Values are never mutated once the parser emits them; the `with_*` methods
/// return modified copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerUnit {
    /// Identifier generated by the parser, unique within one voyage
    pub id: String,

    /// Carrier-assigned container number (e.g. "MSKU1234567")
    pub container_id: String,

    /// ISO 6346 size/type code (e.g. "22G1", "45R1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_type: Option<String>,

    pub status: ContainerStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<IsoCoordinate>,

    /// Gross weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_weight: Option<f64>,

    /// Verified gross mass in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vgm_weight: Option<f64>,

    /// Tare weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tare_weight: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_port: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_port: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<String>,

    /// Carrier/operator code from the NAD+CA segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazard: Option<HazardInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reefer: Option<ReeferSettings>,
}

impl ContainerUnit {
    /// Create a container with only its identifiers set
    pub fn new(id: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            container_id: container_id.into(),
            iso_type: None,
            status: ContainerStatus::Unknown,
            coordinate: None,
            gross_weight: None,
            vgm_weight: None,
            tare_weight: None,
            load_port: None,
            discharge_port: None,
            destination_port: None,
            operator_code: None,
            hazard: None,
            reefer: None,
        }
    }

    pub fn with_iso_type(self, iso_type: impl Into<String>) -> Self {
        Self {
            iso_type: Some(iso_type.into()),
            ..self
        }
    }

    pub fn with_status(self, status: ContainerStatus) -> Self {
        Self { status, ..self }
    }

    pub fn with_coordinate(self, coordinate: IsoCoordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
            ..self
        }
    }

    /// Set one of the three weights
    pub fn with_weight(self, kind: WeightKind, kilograms: f64) -> Self {
        match kind {
            WeightKind::Gross => Self {
                gross_weight: Some(kilograms),
                ..self
            },
            WeightKind::VerifiedGrossMass => Self {
                vgm_weight: Some(kilograms),
                ..self
            },
            WeightKind::Tare => Self {
                tare_weight: Some(kilograms),
                ..self
            },
        }
    }

    pub fn with_operator(self, operator_code: impl Into<String>) -> Self {
        Self {
            operator_code: Some(operator_code.into()),
            ..self
        }
    }

    pub fn with_hazard(self, hazard: HazardInfo) -> Self {
        Self {
            hazard: Some(hazard),
            ..self
        }
    }

    pub fn with_reefer(self, reefer: ReeferSettings) -> Self {
        Self {
            reefer: Some(reefer),
            ..self
        }
    }

    /// Length in feet derived from the ISO size/type code
    pub fn size_in_feet(&self) -> Option<u32> {
        self.iso_type.as_deref().and_then(size_in_feet)
    }

    pub fn height_class(&self) -> HeightClass {
        self.iso_type
            .as_deref()
            .map(height_class)
            .unwrap_or(HeightClass::Unknown)
    }

    pub fn kind(&self) -> ContainerKind {
        self.iso_type
            .as_deref()
            .map(container_kind)
            .unwrap_or(ContainerKind::Other)
    }

    pub fn is_high_cube(&self) -> bool {
        self.height_class() == HeightClass::HighCube
    }

    pub fn is_hazardous(&self) -> bool {
        self.hazard.is_some()
    }

    /// Whether the container has a reefer set point or a reefer ISO type
    pub fn is_reefer(&self) -> bool {
        self.reefer.is_some() || self.kind() == ContainerKind::Reefer
    }

    pub fn is_full(&self) -> bool {
        self.status == ContainerStatus::Full
    }

    pub fn is_empty(&self) -> bool {
        self.status == ContainerStatus::Empty
    }

    /// Cargo weight, gross minus tare, when both are known
    pub fn net_weight(&self) -> Option<f64> {
        match (self.gross_weight, self.tare_weight) {
            (Some(gross), Some(tare)) => Some(gross - tare),
            _ => None,
        }
    }

    /// Bay the container is stowed in, if it has a coordinate
    pub fn bay(&self) -> Option<u16> {
        self.coordinate.as_ref().map(IsoCoordinate::bay)
    }
}

impl fmt::Display for ContainerUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coordinate {
            Some(coordinate) => write!(f, "{} @ {}", self.container_id, coordinate),
            None => write!(f, "{} (unstowed)", self.container_id),
        }
    }
}

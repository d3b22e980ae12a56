//! Bays and the slots within them

use super::ContainerUnit;
use crate::constants::HEAVY_CONTAINER_THRESHOLD_KG;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Restriction placed on a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotRestriction {
    NoReefer,
    NoDangerous,
    NoHighCube,
    NoHeavy,
    ReeferOnly,
    EmptyOnly,
}

impl SlotRestriction {
    /// Whether a container satisfies this restriction
    pub fn permits(self, container: &ContainerUnit) -> bool {
        match self {
            SlotRestriction::NoReefer => !container.is_reefer(),
            SlotRestriction::NoDangerous => !container.is_hazardous(),
            SlotRestriction::NoHighCube => !container.is_high_cube(),
            SlotRestriction::NoHeavy => container
                .gross_weight
                .is_none_or(|weight| weight <= HEAVY_CONTAINER_THRESHOLD_KG),
            SlotRestriction::ReeferOnly => container.is_reefer(),
            SlotRestriction::EmptyOnly => container.is_empty(),
        }
    }
}

/// One cell of a bay, addressed by row and tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSlot {
    pub row: u8,
    pub tier: u8,

    /// Container number occupying the slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    /// Slot cannot be used at all (e.g. blocked by hatch cover or lashing)
    pub is_blocked: bool,

    /// Maximum gross weight accepted, in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<SlotRestriction>,
}

impl ContainerSlot {
    /// Create an empty, unrestricted slot
    pub fn new(row: u8, tier: u8) -> Self {
        Self {
            row,
            tier,
            container_id: None,
            is_blocked: false,
            max_weight: None,
            restrictions: Vec::new(),
        }
    }

    /// Create a slot holding the given container
    pub fn occupied_by(row: u8, tier: u8, container: &ContainerUnit) -> Self {
        Self {
            container_id: Some(container.container_id.clone()),
            ..Self::new(row, tier)
        }
    }

    /// Map key of this slot within its bay
    pub fn key(&self) -> String {
        format!("{:02}{:02}", self.row, self.tier)
    }

    pub fn is_occupied(&self) -> bool {
        self.container_id.is_some()
    }

    /// Copy of this slot with one more restriction
    pub fn with_restriction(&self, restriction: SlotRestriction) -> Self {
        let mut restrictions = self.restrictions.clone();
        if !restrictions.contains(&restriction) {
            restrictions.push(restriction);
            restrictions.sort();
        }
        Self {
            restrictions,
            ..self.clone()
        }
    }

    /// Copy of this slot with a weight limit
    pub fn with_max_weight(&self, kilograms: f64) -> Self {
        Self {
            max_weight: Some(kilograms),
            ..self.clone()
        }
    }

    /// Copy of this slot marked as blocked
    pub fn blocked(&self) -> Self {
        Self {
            is_blocked: true,
            ..self.clone()
        }
    }

    /// Copy of this slot with its occupant removed
    pub fn vacated(&self) -> Self {
        Self {
            container_id: None,
            ..self.clone()
        }
    }

    /// Whether the container could be placed here
    ///
    /// Depends only on the slot's own state and the container's attributes.
    pub fn can_accept(&self, container: &ContainerUnit) -> bool {
        if self.is_blocked || self.is_occupied() {
            return false;
        }

        if let (Some(limit), Some(weight)) = (self.max_weight, container.gross_weight) {
            if weight > limit {
                return false;
            }
        }

        self.restrictions
            .iter()
            .all(|restriction| restriction.permits(container))
    }
}

/// All containers stowed in one bay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bay {
    pub bay_number: u16,

    /// Even bay numbers are treated as 40 ft bays. This is a naming
    /// convention some carriers follow, not something BAPLIE states.
    pub is_40ft_bay: bool,

    pub containers: Vec<ContainerUnit>,

    /// Slots keyed by zero-padded row then tier ("0182")
    pub slots: BTreeMap<String, ContainerSlot>,
}

impl Bay {
    /// Create an empty bay
    pub fn new(bay_number: u16) -> Self {
        Self {
            bay_number,
            is_40ft_bay: bay_number % 2 == 0,
            containers: Vec::new(),
            slots: BTreeMap::new(),
        }
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of occupied slots
    pub fn occupancy(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_occupied()).count()
    }

    /// Sum of known gross weights, in kilograms
    pub fn total_weight(&self) -> f64 {
        self.containers.iter().filter_map(|c| c.gross_weight).sum()
    }

    /// Sum of known verified gross masses, in kilograms
    pub fn total_vgm_weight(&self) -> f64 {
        self.containers.iter().filter_map(|c| c.vgm_weight).sum()
    }

    pub fn on_deck_count(&self) -> usize {
        self.containers
            .iter()
            .filter(|c| c.coordinate.as_ref().is_some_and(|coord| coord.is_on_deck()))
            .count()
    }

    pub fn below_deck_count(&self) -> usize {
        self.container_count() - self.on_deck_count()
    }

    pub fn slot(&self, row: u8, tier: u8) -> Option<&ContainerSlot> {
        self.slots.get(&format!("{:02}{:02}", row, tier))
    }

    /// Rows in use, ascending
    pub fn rows(&self) -> Vec<u8> {
        let mut rows: Vec<u8> = self.slots.values().map(|slot| slot.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }

    /// Tiers in use, ascending
    pub fn tiers(&self) -> Vec<u8> {
        let mut tiers: Vec<u8> = self.slots.values().map(|slot| slot.tier).collect();
        tiers.sort_unstable();
        tiers.dedup();
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{ContainerStatus, HazardInfo, ReeferSettings, TemperatureUnit, WeightKind};

    fn general_container() -> ContainerUnit {
        ContainerUnit::new("U00001", "ABCU1234567")
            .with_iso_type("22G1")
            .with_status(ContainerStatus::Full)
            .with_weight(WeightKind::Gross, 18_000.0)
    }

    #[test]
    fn test_forty_foot_heuristic() {
        assert!(Bay::new(2).is_40ft_bay);
        assert!(Bay::new(10).is_40ft_bay);
        assert!(!Bay::new(1).is_40ft_bay);
        assert!(!Bay::new(13).is_40ft_bay);
    }

    #[test]
    fn test_empty_slot_accepts_unrestricted_container() {
        let slot = ContainerSlot::new(1, 82);
        assert_eq!(slot.key(), "0182");
        assert!(slot.can_accept(&general_container()));
    }

    #[test]
    fn test_occupied_or_blocked_slot_rejects() {
        let container = general_container();
        let occupied = ContainerSlot::occupied_by(1, 82, &container);
        assert!(occupied.is_occupied());
        assert!(!occupied.can_accept(&container));
        assert!(occupied.vacated().can_accept(&container));

        let blocked = ContainerSlot::new(1, 82).blocked();
        assert!(!blocked.can_accept(&container));
    }

    #[test]
    fn test_weight_limit() {
        let slot = ContainerSlot::new(2, 4).with_max_weight(15_000.0);
        assert!(!slot.can_accept(&general_container()));

        let light = general_container().with_weight(WeightKind::Gross, 9_000.0);
        assert!(slot.can_accept(&light));
    }

    #[test]
    fn test_restrictions() {
        let reefer = ContainerUnit::new("U00002", "REEU7654321")
            .with_iso_type("45R1")
            .with_reefer(ReeferSettings {
                temperature: Some(-18.0),
                unit: TemperatureUnit::Celsius,
            });
        let hazardous = general_container().with_hazard(HazardInfo {
            imdg_class: Some("3".to_string()),
            un_number: Some("1203".to_string()),
        });
        let heavy = general_container().with_weight(WeightKind::Gross, 32_000.0);
        let empty = ContainerUnit::new("U00003", "EMPU0000001").with_status(ContainerStatus::Empty);

        let slot = ContainerSlot::new(1, 2);
        assert!(!slot.with_restriction(SlotRestriction::NoReefer).can_accept(&reefer));
        assert!(!slot.with_restriction(SlotRestriction::NoHighCube).can_accept(&reefer));
        assert!(slot.with_restriction(SlotRestriction::ReeferOnly).can_accept(&reefer));
        assert!(!slot.with_restriction(SlotRestriction::ReeferOnly).can_accept(&hazardous));
        assert!(!slot.with_restriction(SlotRestriction::NoDangerous).can_accept(&hazardous));
        assert!(!slot.with_restriction(SlotRestriction::NoHeavy).can_accept(&heavy));
        assert!(slot.with_restriction(SlotRestriction::NoHeavy).can_accept(&general_container()));
        assert!(slot.with_restriction(SlotRestriction::EmptyOnly).can_accept(&empty));
        assert!(!slot.with_restriction(SlotRestriction::EmptyOnly).can_accept(&heavy));
    }

    #[test]
    fn test_with_restriction_is_idempotent() {
        let slot = ContainerSlot::new(1, 2)
            .with_restriction(SlotRestriction::NoReefer)
            .with_restriction(SlotRestriction::NoReefer);
        assert_eq!(slot.restrictions, vec![SlotRestriction::NoReefer]);
    }
}

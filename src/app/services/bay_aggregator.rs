//! Bay aggregation
//!
//! Groups a flat container list into bays keyed by bay number. Containers
//! without a coordinate stay out of every bay. Each bay gets one slot per
//! occupied "row+tier" position.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, warn};

use crate::app::models::{Bay, ContainerSlot, ContainerUnit};

/// Build the bay map for a list of containers
///
/// Container order within a bay follows the input order. When two containers
/// claim the same slot, both are listed in the bay but the slot records the
/// first.
pub fn aggregate_bays(containers: &[ContainerUnit]) -> BTreeMap<u16, Bay> {
    let mut bays: BTreeMap<u16, Bay> = BTreeMap::new();

    for container in containers {
        let Some(coordinate) = &container.coordinate else {
            continue;
        };

        let bay = bays
            .entry(coordinate.bay())
            .or_insert_with(|| Bay::new(coordinate.bay()));

        match bay.slots.entry(coordinate.slot_key()) {
            Entry::Vacant(entry) => {
                entry.insert(ContainerSlot::occupied_by(
                    coordinate.row(),
                    coordinate.tier(),
                    container,
                ));
            }
            Entry::Occupied(entry) => {
                warn!(
                    "Slot {} already holds {:?}; {} listed in bay without a slot",
                    coordinate,
                    entry.get().container_id,
                    container.container_id
                );
            }
        }

        bay.containers.push(container.clone());
    }

    debug!(
        "Aggregated {} containers into {} bays",
        bays.values().map(Bay::container_count).sum::<usize>(),
        bays.len()
    );

    bays
}

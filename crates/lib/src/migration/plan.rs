//! Pure planning step of the container collapse.
//!
//! The planner works on an arena of records keyed by id. Containers are
//! collapsed one by one, deepest first, by rewriting addresses inside the
//! arena; the resulting plan is the difference between the arena and the
//! snapshot it started from.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::errors::MigrationError;
use crate::Result;
use crate::coord::Coord;
use crate::item::{ItemId, ItemRecord};

/// One record's new address and parent link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressUpdate {
    pub id: ItemId,
    pub from: Coord,
    pub to: Coord,
    pub parent_id: Option<ItemId>,
}

/// Summary counts of a collapse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Containers deleted.
    pub containers_removed: usize,
    /// Direct children of containers moved to a composed slot.
    pub children_reattached: usize,
    /// Deeper descendants whose address changed along with their ancestor.
    pub descendants_readdressed: usize,
}

impl MigrationReport {
    /// Returns true if the collapse had nothing to do.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} containers removed, {} children reattached, {} descendants re-addressed",
            self.containers_removed, self.children_reattached, self.descendants_readdressed
        )
    }
}

/// The writes a collapse will apply, computed without touching storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    /// Address rewrites, ordered by id.
    pub updates: Vec<AddressUpdate>,
    /// Containers to delete, in the order they were collapsed.
    pub deletions: Vec<ItemId>,
    pub report: MigrationReport,
}

impl MigrationPlan {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deletions.is_empty()
    }
}

/// Returns true for records at a composition slot. The root never counts.
pub(crate) fn is_container(coords: &Coord) -> bool {
    !coords.is_root() && coords.direction().is_center()
}

/// Computes the container collapse over a snapshot of records.
///
/// The snapshot must hold every container, every direct child of a
/// container, and every descendant of those children. Other records may be
/// present and are left alone unless they are in one of those sets.
///
/// For each container, deepest first and in address order at equal depth:
/// each direct child moves from `container + [d]` to
/// `grandparent + [-d]` and takes over the container's parent id, every
/// descendant of the child has its address prefix rewritten, and the
/// container is deleted. Only `coords` and `parent_id` ever change.
///
/// # Errors
///
/// - [`MigrationError::UnexpectedChildDirection`] if a container's child is
///   not at a structural direction.
/// - [`MigrationError::OrphanedContainer`] if a container below depth 1 has
///   no parent id.
/// - [`MigrationError::AddressCollision`] if two records would end up at the
///   same address.
pub fn plan_container_collapse(
    records: impl IntoIterator<Item = ItemRecord>,
) -> Result<MigrationPlan> {
    let mut arena: BTreeMap<ItemId, ItemRecord> = records
        .into_iter()
        .map(|record| (record.id, record))
        .collect();
    let original: HashMap<ItemId, (Coord, Option<ItemId>)> = arena
        .values()
        .map(|record| (record.id, (record.coords.clone(), record.parent_id)))
        .collect();

    let mut containers: Vec<(usize, Coord, ItemId)> = arena
        .values()
        .filter(|record| is_container(&record.coords))
        .map(|record| (record.coords.depth(), record.coords.clone(), record.id))
        .collect();
    containers.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let mut report = MigrationReport::default();
    let mut deletions = Vec::with_capacity(containers.len());
    let mut reattached = BTreeSet::new();

    for (_, _, container_id) in containers {
        let Some(container) = arena.remove(&container_id) else {
            continue;
        };
        let Some(grandparent) = container.coords.parent() else {
            continue;
        };
        if container.parent_id.is_none() && container.coords.depth() > 1 {
            return Err(MigrationError::OrphanedContainer {
                container: container.id,
                coords: container.coords.to_string(),
            }
            .into());
        }

        let mut children: Vec<(Coord, ItemId)> = arena
            .values()
            .filter(|record| record.parent_id == Some(container.id))
            .map(|record| (record.coords.clone(), record.id))
            .collect();
        children.sort();

        tracing::debug!(
            container = %container.coords,
            children = children.len(),
            "Collapsing container"
        );

        for (old_coords, child_id) in children {
            let direction = old_coords.direction();
            let composed = direction.to_composed().ok_or(
                MigrationError::UnexpectedChildDirection {
                    container: container.id,
                    child: child_id,
                    direction,
                },
            )?;
            let new_coords = grandparent.child(composed);

            let descendants: Vec<ItemId> = arena
                .values()
                .filter(|record| record.coords.is_descendant_of(&old_coords))
                .map(|record| record.id)
                .collect();
            for id in descendants {
                if let Some(record) = arena.get_mut(&id)
                    && let Some(moved) = record.coords.with_prefix_replaced(&old_coords, &new_coords)
                {
                    record.coords = moved;
                }
            }

            if let Some(child) = arena.get_mut(&child_id) {
                child.coords = new_coords;
                child.parent_id = container.parent_id;
            }
            reattached.insert(child_id);
        }

        deletions.push(container.id);
    }

    let mut occupied: HashMap<&Coord, ItemId> = HashMap::with_capacity(arena.len());
    for record in arena.values() {
        if let Some(first) = occupied.insert(&record.coords, record.id) {
            return Err(MigrationError::AddressCollision {
                coords: record.coords.to_string(),
                first,
                second: record.id,
            }
            .into());
        }
    }

    let updates: Vec<AddressUpdate> = arena
        .values()
        .filter_map(|record| {
            let (from, parent_id) = original.get(&record.id)?;
            if *from == record.coords && *parent_id == record.parent_id {
                return None;
            }
            Some(AddressUpdate {
                id: record.id,
                from: from.clone(),
                to: record.coords.clone(),
                parent_id: record.parent_id,
            })
        })
        .collect();

    report.containers_removed = deletions.len();
    report.children_reattached = reattached.len();
    report.descendants_readdressed = updates
        .iter()
        .filter(|update| !reattached.contains(&update.id))
        .count();

    Ok(MigrationPlan {
        updates,
        deletions,
        report,
    })
}

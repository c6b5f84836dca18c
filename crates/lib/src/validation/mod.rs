//! Structural validation for map items.
//!
//! Two independent rule sets:
//!
//! - **Neighbor rules** ([`validate_neighbors`]): every neighbor of a node
//!   must have its own direction, and the node's breadth is capped at six
//!   direct children, or seven when one of them fills the composition slot
//!   (direction `0`). Structural and composed children count alike. Zero or
//!   one neighbor always passes. [`validate_neighbor_placement`] additionally checks that
//!   each neighbor really is a direct child of the node, and
//!   [`validate_neighbor_links`] that each neighbor record links back to it.
//! - **Parent-type rules** ([`validate_parent_type`]): a root-type item has no
//!   parent and sits at the center of its space; anything else has a parent.
//!
//! All checks are pure predicates over in-memory values. Callers run them
//! before persisting a changed child set and reject the mutation on error.

mod errors;

use std::collections::BTreeSet;

pub use errors::ValidationError;

use crate::{
    Coord, Direction,
    constants::{MAX_NEIGHBORS_WITH_COMPOSITION, MAX_STRUCTURAL_NEIGHBORS},
    item::{ItemId, ItemType},
};

/// A node whose direct children can be inspected.
pub trait HasNeighbors {
    /// Address of the node itself.
    fn coords(&self) -> &Coord;

    /// Addresses of its materialized children.
    fn neighbor_coords(&self) -> Vec<&Coord>;
}

/// A bare address plus child addresses, for validating a prospective child
/// set without building full records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborSet {
    pub coords: Coord,
    pub neighbors: Vec<Coord>,
}

impl NeighborSet {
    pub fn new(coords: Coord, neighbors: Vec<Coord>) -> Self {
        Self { coords, neighbors }
    }
}

impl HasNeighbors for NeighborSet {
    fn coords(&self) -> &Coord {
        &self.coords
    }

    fn neighbor_coords(&self) -> Vec<&Coord> {
        self.neighbors.iter().collect()
    }
}

/// Checks direction uniqueness and breadth of a node's neighbors.
///
/// Fails with [`ValidationError::DuplicateDirection`] when two neighbors end
/// in the same step (`2` and `-2` are different steps). Fails with
/// [`ValidationError::InvalidDirection`] for a step outside `-6..=6`, and with
/// [`ValidationError::TooManyNeighbors`] when there are more than 6
/// neighbors, or more than 7 with a composition slot present. The outcome does
/// not depend on neighbor order.
pub fn validate_neighbors<N: HasNeighbors + ?Sized>(node: &N) -> Result<(), ValidationError> {
    let neighbors = node.neighbor_coords();
    if neighbors.len() <= 1 {
        return Ok(());
    }

    let mut seen = BTreeSet::new();
    for neighbor in &neighbors {
        let direction = neighbor.direction();
        if !direction.is_known() {
            return Err(ValidationError::InvalidDirection {
                neighbor: neighbor.to_string(),
                direction,
            });
        }
        if !seen.insert(direction) {
            return Err(ValidationError::DuplicateDirection {
                coords: node.coords().to_string(),
                direction,
            });
        }
    }

    let capacity = if seen.contains(&Direction::CENTER) {
        MAX_NEIGHBORS_WITH_COMPOSITION
    } else {
        MAX_STRUCTURAL_NEIGHBORS
    };
    let count = neighbors.len();
    if count > capacity {
        return Err(ValidationError::TooManyNeighbors {
            coords: node.coords().to_string(),
            count,
            capacity,
        });
    }

    Ok(())
}

/// Checks that every neighbor sits exactly one step below the node.
pub fn validate_neighbor_placement<N: HasNeighbors + ?Sized>(
    node: &N,
) -> Result<(), ValidationError> {
    let coords = node.coords();
    for neighbor in node.neighbor_coords() {
        if neighbor.parent().as_ref() != Some(coords) {
            return Err(ValidationError::NeighborNotChild {
                coords: coords.to_string(),
                neighbor: neighbor.to_string(),
            });
        }
    }
    Ok(())
}

/// Checks that every neighbor record links back to `parent_id`.
pub fn validate_neighbor_links<'a>(
    parent_id: ItemId,
    neighbors: impl IntoIterator<Item = (&'a Coord, Option<ItemId>)>,
) -> Result<(), ValidationError> {
    for (coords, found) in neighbors {
        if found != Some(parent_id) {
            return Err(ValidationError::NeighborParentMismatch {
                neighbor: coords.to_string(),
                expected: parent_id,
                found,
            });
        }
    }
    Ok(())
}

/// Checks the parent-type constraint for a single item.
pub fn validate_parent_type(
    item_type: ItemType,
    coords: &Coord,
    parent_id: Option<ItemId>,
) -> Result<(), ValidationError> {
    match (item_type.is_root(), parent_id) {
        (true, Some(_)) => Err(ValidationError::RootItemHasParent {
            coords: coords.to_string(),
            item_type,
        }),
        (true, None) if !coords.is_root() => Err(ValidationError::RootItemNotAtCenter {
            coords: coords.to_string(),
        }),
        (false, None) => Err(ValidationError::NonRootItemMissingParent {
            coords: coords.to_string(),
            item_type,
        }),
        _ => Ok(()),
    }
}

//! Structural validation error types.

use thiserror::Error;

use crate::Direction;
use crate::item::{ItemId, ItemType};

/// Errors raised when a node or its neighbor set breaks a structural rule.
///
/// These are deterministic: the same input always produces the same error.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Two neighbors resolve to the same direction.
    #[error("Duplicate direction {direction} among neighbors of {coords}")]
    DuplicateDirection {
        /// Address of the node whose neighbors collide
        coords: String,
        /// The repeated direction
        direction: Direction,
    },

    /// More neighbors than the node can hold.
    #[error("Too many neighbors for {coords}: {count} exceeds capacity {capacity}")]
    TooManyNeighbors {
        /// Address of the overfull node
        coords: String,
        /// Number of neighbors counted against the capacity
        count: usize,
        /// Capacity that applied (6, or 7 with a composition slot)
        capacity: usize,
    },

    /// A neighbor's last step is outside `-6..=6`.
    #[error("Invalid direction {direction} for neighbor {neighbor}")]
    InvalidDirection {
        /// Address of the offending neighbor
        neighbor: String,
        /// The out-of-range step
        direction: Direction,
    },

    /// A neighbor is not a direct child of the node.
    #[error("Neighbor {neighbor} is not a direct child of {coords}")]
    NeighborNotChild {
        /// Address of the node
        coords: String,
        /// Address of the misplaced neighbor
        neighbor: String,
    },

    /// A neighbor's parent link does not point at the node holding it.
    #[error("Neighbor {neighbor} of item {expected} links to parent {found:?}")]
    NeighborParentMismatch {
        /// Address of the neighbor
        neighbor: String,
        /// Id of the node the neighbor was attached to
        expected: ItemId,
        /// The neighbor's own `parent_id`
        found: Option<ItemId>,
    },

    /// A root-type item was given a parent.
    #[error("root item cannot have parent ({item_type:?} at {coords})")]
    RootItemHasParent {
        /// Address of the item
        coords: String,
        /// The item's type
        item_type: ItemType,
    },

    /// A root-type item does not sit at the center of its space.
    #[error("root item must be at the center of its space, found {coords}")]
    RootItemNotAtCenter {
        /// Address of the item
        coords: String,
    },

    /// A non-root item has no parent.
    #[error("non-root item must have parent ({item_type:?} at {coords})")]
    NonRootItemMissingParent {
        /// Address of the item
        coords: String,
        /// The item's type
        item_type: ItemType,
    },
}

impl ValidationError {
    /// Check if this error concerns a node's neighbor set.
    pub fn is_neighbor_error(&self) -> bool {
        matches!(
            self,
            ValidationError::DuplicateDirection { .. }
                | ValidationError::TooManyNeighbors { .. }
                | ValidationError::InvalidDirection { .. }
                | ValidationError::NeighborNotChild { .. }
                | ValidationError::NeighborParentMismatch { .. }
        )
    }

    /// Check if this error is a parent-type constraint violation.
    pub fn is_parent_type_error(&self) -> bool {
        matches!(
            self,
            ValidationError::RootItemHasParent { .. }
                | ValidationError::RootItemNotAtCenter { .. }
                | ValidationError::NonRootItemMissingParent { .. }
        )
    }
}

impl From<ValidationError> for crate::Error {
    fn from(err: ValidationError) -> Self {
        crate::Error::Validation(err)
    }
}

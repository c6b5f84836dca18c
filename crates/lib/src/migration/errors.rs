//! Error types for data migrations.

use thiserror::Error;

use crate::Direction;
use crate::item::ItemId;

/// Errors that abort a migration before anything is written.
///
/// A migration either fails with one of these while planning, or with a
/// storage error while applying; in both cases the enclosing transaction is
/// rolled back.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MigrationError {
    /// A container holds a child that is not at a structural direction.
    #[error("Container {container} has child {child} at non-structural direction {direction}")]
    UnexpectedChildDirection {
        /// Id of the container being collapsed
        container: ItemId,
        /// Id of the offending child
        child: ItemId,
        /// The child's last step
        direction: Direction,
    },

    /// A container below depth 1 has no parent record to hand its children to.
    #[error("Container {container} at {coords} has no parent")]
    OrphanedContainer {
        /// Id of the container
        container: ItemId,
        /// The container's address
        coords: String,
    },

    /// Two records would end up at the same address.
    #[error("Items {first} and {second} would both move to {coords}")]
    AddressCollision {
        /// Address both records resolve to
        coords: String,
        /// Lower of the two ids
        first: ItemId,
        /// Higher of the two ids
        second: ItemId,
    },
}

impl MigrationError {
    /// The container the error is about, if any.
    pub fn container(&self) -> Option<ItemId> {
        match self {
            MigrationError::UnexpectedChildDirection { container, .. }
            | MigrationError::OrphanedContainer { container, .. } => Some(*container),
            MigrationError::AddressCollision { .. } => None,
        }
    }
}

impl From<MigrationError> for crate::Error {
    fn from(err: MigrationError) -> Self {
        crate::Error::Migration(err)
    }
}

//!
//! Hexframe core: the hexagonal address system behind Hexframe maps.
//!
//! A Hexframe map is a tree of hexagonal tiles. Every tile is addressed by the
//! owner of its space, a group id and the list of steps taken from the root
//! tile to reach it.
//!
//! ## Core Concepts
//!
//! * **Directions (`coord::Direction`)**: A signed step. `1..=6` are the six
//!   structural neighbors, `0` is the composition slot and `-1..=-6` are the
//!   composed children.
//! * **Addresses (`coord::Coord`)**: `(owner, group, path)`, written as
//!   `"owner,group:d1,d2,..."`. [`CoordSystem`] is the address algebra over
//!   both the typed and the string form.
//! * **Items (`item::ItemRecord`, `item::MapItem`)**: The persisted tiles and the
//!   aggregate used to validate a tile together with its children.
//! * **Validation (`validation`)**: Neighbor uniqueness, breadth caps and the
//!   parent-type constraint.
//! * **Backends (`backend::NodeStore`)**: A pluggable, transactional record store.
//! * **Migrations (`migration`)**: The container collapse that moves legacy
//!   composition containers to direct composed children.

pub mod backend;
pub mod constants;
pub mod coord;
pub mod item;
pub mod migration;
pub mod validation;

pub use coord::{Coord, CoordSystem, Direction};
pub use item::{ItemContent, ItemId, ItemRecord, ItemType, MapItem};

/// Result type used throughout the Hexframe library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Hexframe library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Address parsing errors from the coord module
    #[error(transparent)]
    Coord(coord::CoordError),

    /// Structural validation errors from the validation module
    #[error(transparent)]
    Validation(validation::ValidationError),

    /// Storage errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),

    /// Planning errors from the migration module
    #[error(transparent)]
    Migration(migration::MigrationError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Coord(_) => "coord",
            Error::Validation(_) => "validation",
            Error::Backend(_) => "backend",
            Error::Migration(_) => "migration",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_conflict(),
            Error::Migration(migration::MigrationError::AddressCollision { .. }) => true,
            _ => false,
        }
    }

    /// Check if this error is an address syntax failure.
    pub fn is_malformed_address(&self) -> bool {
        match self {
            Error::Coord(coord_err) => coord_err.is_malformed_address(),
            _ => false,
        }
    }

    /// Check if this error is a structural or parent-type violation.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error comes from the record store.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// Check if this error aborted a migration plan.
    pub fn is_migration_error(&self) -> bool {
        matches!(self, Error::Migration(_))
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_integrity_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Backend(backend_err) => backend_err.is_io_error(),
            _ => false,
        }
    }
}

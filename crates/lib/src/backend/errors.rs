//! Storage error types for the Hexframe backends.
//!
//! This module defines structured error types for record store operations,
//! providing better error context and type safety compared to string-based errors.

use thiserror::Error;

use crate::item::ItemId;

/// Errors that can occur during record store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Field additions/changes require a major version bump
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// Item not found by id.
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The id of the item that was not found
        id: ItemId,
    },

    /// An item with this id already exists.
    #[error("Item already exists: {id}")]
    DuplicateId {
        /// The conflicting id
        id: ItemId,
    },

    /// Another item already occupies this address.
    #[error("Address {coords} is already occupied by item {existing}")]
    DuplicateAddress {
        /// The contested address
        coords: String,
        /// The item currently holding it
        existing: ItemId,
    },

    /// A stored address could not be decoded.
    #[error("Corrupt stored address for item {id}: {reason}")]
    CorruptAddress {
        /// The item whose row is corrupt
        id: ItemId,
        /// Description of the problem
        reason: String,
    },

    /// The transaction was already committed or rolled back.
    #[error("Transaction is no longer active")]
    TransactionClosed,

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error from the SQL layer.
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("SQL error: {reason}")]
    SqlxError {
        /// Context and message
        reason: String,
        /// The underlying sqlx error, if any
        #[source]
        source: Option<sqlx::Error>,
    },
}

impl BackendError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::ItemNotFound { .. })
    }

    /// Check if this error is a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            BackendError::DuplicateId { .. } | BackendError::DuplicateAddress { .. }
        )
    }

    /// Check if this error indicates stored data that cannot be trusted.
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, BackendError::CorruptAddress { .. })
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            BackendError::FileIo { .. }
                | BackendError::SerializationFailed { .. }
                | BackendError::DeserializationFailed { .. }
        )
    }

    /// Get the item id if this error is about a specific item.
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            BackendError::ItemNotFound { id }
            | BackendError::DuplicateId { id }
            | BackendError::CorruptAddress { id, .. } => Some(*id),
            BackendError::DuplicateAddress { existing, .. } => Some(*existing),
            _ => None,
        }
    }
}

// Conversion from BackendError to the main Error type
impl From<BackendError> for crate::Error {
    fn from(err: BackendError) -> Self {
        crate::Error::Backend(err)
    }
}

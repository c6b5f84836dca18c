//! Error types for address parsing.

use thiserror::Error;

/// Errors produced while turning an address string into a [`Coord`](super::Coord).
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordError {
    /// The address string does not have the `owner,group[:path]` shape.
    #[error("Malformed address '{id}': {reason}")]
    MalformedAddress {
        /// The offending address string
        id: String,
        /// What was wrong with it
        reason: String,
    },
}

impl CoordError {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        CoordError::MalformedAddress {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error is an address syntax failure.
    pub fn is_malformed_address(&self) -> bool {
        matches!(self, CoordError::MalformedAddress { .. })
    }

    /// The address string that failed to parse.
    pub fn id(&self) -> &str {
        match self {
            CoordError::MalformedAddress { id, .. } => id,
        }
    }
}

impl From<CoordError> for crate::Error {
    fn from(err: CoordError) -> Self {
        crate::Error::Coord(err)
    }
}

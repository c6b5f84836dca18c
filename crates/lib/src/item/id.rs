//! Identifier type for persisted map items.

use serde::{Deserialize, Serialize};

/// The storage identifier of a map item.
///
/// Ids are assigned by the storage layer and are stable across address
/// rewrites: moving a tile changes its [`Coord`](crate::Coord), never its id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

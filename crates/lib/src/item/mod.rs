//! Map item records and the aggregate used for structural validation.
//!
//! * [`ItemRecord`] is one persisted tile: its id, address, parent link, type
//!   and content. The storage layer owns these; the core only reads and
//!   rewrites `coords` and `parent_id`.
//! * [`MapItem`] is a record together with its materialized child records.
//!   Constructing one enforces the parent-type constraint and the neighbor
//!   rules from [`crate::validation`].

mod id;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use id::ItemId;

use crate::{
    Coord, Result,
    validation::{self, HasNeighbors},
};

/// Classification of a map item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// The root tile of a user's space. Has no parent and an empty path.
    User,
    /// Any other tile.
    #[default]
    Base,
}

impl ItemType {
    /// Returns `true` for the distinguished root type.
    pub fn is_root(self) -> bool {
        matches!(self, ItemType::User)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::User => "user",
            ItemType::Base => "base",
        }
    }

    /// Parses the stored representation; unknown values fall back to `Base`.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "user" => ItemType::User,
            _ => ItemType::Base,
        }
    }
}

/// Tile content. Never touched by address operations or migrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemContent {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub link: String,
}

impl ItemContent {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A persisted map item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub coords: Coord,
    pub parent_id: Option<ItemId>,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub content: ItemContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemRecord {
    /// Creates a `Base` record with empty content, timestamped now.
    pub fn new(id: ItemId, coords: Coord, parent_id: Option<ItemId>) -> Self {
        let now = Utc::now();
        Self {
            id,
            coords,
            parent_id,
            item_type: ItemType::Base,
            content: ItemContent::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates the `User` root record of a space.
    pub fn user_root(id: ItemId, coords: Coord) -> Self {
        Self {
            item_type: ItemType::User,
            ..Self::new(id, coords, None)
        }
    }

    pub fn with_content(mut self, content: ItemContent) -> Self {
        self.content = content;
        self
    }

    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// Checks the parent-type constraint for this record.
    pub fn validate(&self) -> Result<()> {
        validation::validate_parent_type(self.item_type, &self.coords, self.parent_id)?;
        Ok(())
    }
}

/// A map item with its direct children materialized.
///
/// ```rust
/// use hexframe::{Coord, ItemId, ItemRecord, MapItem};
///
/// let root = ItemRecord::user_root(ItemId::new(1), Coord::root("1", 0));
/// let child = ItemRecord::new(ItemId::new(2), "1,0:3".parse()?, Some(root.id));
/// let item = MapItem::new(root, vec![child])?;
/// assert_eq!(item.neighbors().len(), 1);
/// # Ok::<(), hexframe::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    record: ItemRecord,
    neighbors: Vec<ItemRecord>,
}

impl MapItem {
    /// Builds the aggregate, rejecting it if the record violates the
    /// parent-type constraint or the children violate the neighbor rules.
    ///
    /// Each neighbor must sit one step below the record and carry the
    /// record's id as its `parent_id`.
    pub fn new(record: ItemRecord, neighbors: Vec<ItemRecord>) -> Result<Self> {
        record.validate()?;
        let item = Self { record, neighbors };
        validation::validate_neighbors(&item)?;
        validation::validate_neighbor_placement(&item)?;
        validation::validate_neighbor_links(
            item.record.id,
            item.neighbors.iter().map(|n| (&n.coords, n.parent_id)),
        )?;
        Ok(item)
    }

    pub fn record(&self) -> &ItemRecord {
        &self.record
    }

    pub fn neighbors(&self) -> &[ItemRecord] {
        &self.neighbors
    }

    /// Returns a new aggregate with `neighbor` added, validating the result.
    pub fn with_neighbor(&self, neighbor: ItemRecord) -> Result<Self> {
        let mut neighbors = self.neighbors.clone();
        neighbors.push(neighbor);
        Self::new(self.record.clone(), neighbors)
    }

    pub fn into_parts(self) -> (ItemRecord, Vec<ItemRecord>) {
        (self.record, self.neighbors)
    }
}

impl HasNeighbors for MapItem {
    fn coords(&self) -> &Coord {
        &self.record.coords
    }

    fn neighbor_coords(&self) -> Vec<&Coord> {
        self.neighbors.iter().map(|n| &n.coords).collect()
    }
}

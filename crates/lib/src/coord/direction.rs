//! Direction steps used in hexagonal addresses.
//!
//! A [`Direction`] is one downward step in a [`Coord`](super::Coord) path. The
//! values fall into three families:
//!
//! - `0` ([`Direction::CENTER`]): the composition slot. A node whose address
//!   ends here is a legacy composition container. The root's own direction is
//!   also reported as `CENTER` by convention.
//! - `1..=6`: the six structural hex neighbors, clockwise from north-west.
//! - `-1..=-6`: composed children, mirroring the structural six by absolute
//!   value.
//!
//! Directions are stored as a plain signed integer. Values outside `-6..=6`
//! are carried through parsing and address arithmetic untouched; only the
//! structure validator rejects them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single step in a hexagonal address path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Direction(i32);

impl Direction {
    /// The composition slot, and the conventional direction of the root.
    pub const CENTER: Direction = Direction(0);

    pub const NORTH_WEST: Direction = Direction(1);
    pub const NORTH_EAST: Direction = Direction(2);
    pub const EAST: Direction = Direction(3);
    pub const SOUTH_EAST: Direction = Direction(4);
    pub const SOUTH_WEST: Direction = Direction(5);
    pub const WEST: Direction = Direction(6);

    pub const COMPOSED_NORTH_WEST: Direction = Direction(-1);
    pub const COMPOSED_NORTH_EAST: Direction = Direction(-2);
    pub const COMPOSED_EAST: Direction = Direction(-3);
    pub const COMPOSED_SOUTH_EAST: Direction = Direction(-4);
    pub const COMPOSED_SOUTH_WEST: Direction = Direction(-5);
    pub const COMPOSED_WEST: Direction = Direction(-6);

    /// The six structural directions in canonical order.
    pub const STRUCTURAL: [Direction; 6] = [
        Self::NORTH_WEST,
        Self::NORTH_EAST,
        Self::EAST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
        Self::WEST,
    ];

    /// The six composed directions in canonical order.
    pub const COMPOSED: [Direction; 6] = [
        Self::COMPOSED_NORTH_WEST,
        Self::COMPOSED_NORTH_EAST,
        Self::COMPOSED_EAST,
        Self::COMPOSED_SOUTH_EAST,
        Self::COMPOSED_SOUTH_WEST,
        Self::COMPOSED_WEST,
    ];

    /// Wraps a raw integer without range checking.
    pub const fn new(value: i32) -> Self {
        Direction(value)
    }

    /// Returns the raw integer value.
    pub const fn value(self) -> i32 {
        self.0
    }

    pub const fn is_center(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` for the six structural neighbors (`1..=6`).
    pub const fn is_structural(self) -> bool {
        self.0 >= 1 && self.0 <= 6
    }

    /// Returns `true` for the six composed directions (`-6..=-1`).
    pub const fn is_composed(self) -> bool {
        self.0 >= -6 && self.0 <= -1
    }

    /// Returns `true` if the value belongs to one of the three families.
    pub const fn is_known(self) -> bool {
        self.0 >= -6 && self.0 <= 6
    }

    /// Maps a structural direction to its composed counterpart.
    ///
    /// Returns `None` for anything that is not structural.
    ///
    /// ```rust
    /// # use hexframe::Direction;
    /// assert_eq!(Direction::EAST.to_composed(), Some(Direction::COMPOSED_EAST));
    /// assert_eq!(Direction::CENTER.to_composed(), None);
    /// ```
    pub const fn to_composed(self) -> Option<Direction> {
        if self.is_structural() {
            Some(Direction(-self.0))
        } else {
            None
        }
    }

    /// Maps a composed direction back to its structural counterpart.
    ///
    /// Returns `None` for anything that is not composed.
    pub const fn to_structural(self) -> Option<Direction> {
        if self.is_composed() {
            Some(Direction(-self.0))
        } else {
            None
        }
    }
}

impl From<i32> for Direction {
    fn from(value: i32) -> Self {
        Direction(value)
    }
}

impl From<Direction> for i32 {
    fn from(direction: Direction) -> Self {
        direction.0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

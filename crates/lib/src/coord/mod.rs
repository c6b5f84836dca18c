//! Hexagonal hierarchical addressing.
//!
//! Every tile in a Hexframe map lives at a [`Coord`]: an owner, a group and a
//! path of [`Direction`] steps leading down from that space's root. The
//! canonical string form is
//!
//! ```text
//! {owner_id},{group_id}              root of the space
//! {owner_id},{group_id}:{d1,...,dn}  anything below it
//! ```
//!
//! e.g. `"1,0"`, `"1,0:1,-1"`, `"1,0:-3"`. This form is persisted and shows
//! up in URLs, so it must stay byte-for-byte stable.
//!
//! [`Coord`] methods are the address algebra; [`CoordSystem`] exposes the same
//! operations keyed by the string form. Everything here is pure: inputs are
//! never mutated and no I/O is performed.
//!
//! # Usage
//!
//! ```rust
//! use hexframe::{Coord, Direction};
//!
//! let tile: Coord = "1,0:1,-2".parse()?;
//! assert_eq!(tile.depth(), 2);
//! assert_eq!(tile.direction(), Direction::COMPOSED_NORTH_EAST);
//! assert_eq!(tile.parent().unwrap().to_string(), "1,0:1");
//! assert!(tile.is_composed_child());
//! # Ok::<(), hexframe::coord::CoordError>(())
//! ```

mod direction;
mod errors;
mod system;


use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use direction::Direction;
pub use errors::CoordError;
pub use system::CoordSystem;

use crate::constants::{DIRECTION_SEPARATOR, PATH_SEPARATOR};

/// The address of a node: `(owner_id, group_id, path)`.
///
/// The empty path is the root of the `(owner_id, group_id)` space. Owner ids
/// must be non-empty and must not contain `:`; otherwise the string form does
/// not round-trip.
///
/// Serialized with serde as its canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coord {
    owner_id: String,
    group_id: i64,
    path: Vec<Direction>,
}

impl Coord {
    /// Creates an address from its parts.
    pub fn new(owner_id: impl Into<String>, group_id: i64, path: Vec<Direction>) -> Self {
        Self {
            owner_id: owner_id.into(),
            group_id,
            path,
        }
    }

    /// The root (center) address of a space.
    pub fn root(owner_id: impl Into<String>, group_id: i64) -> Self {
        Self::new(owner_id, group_id, Vec::new())
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    /// Number of steps below the root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns `true` if both addresses live in the same `(owner, group)` space.
    pub fn same_space(&self, other: &Coord) -> bool {
        self.owner_id == other.owner_id && self.group_id == other.group_id
    }

    /// The last step of the path, or [`Direction::CENTER`] for the root.
    pub fn direction(&self) -> Direction {
        self.path.last().copied().unwrap_or(Direction::CENTER)
    }

    /// The address with its last step removed, or `None` for the root.
    ///
    /// The removed step may belong to any family.
    pub fn parent(&self) -> Option<Coord> {
        let (_, rest) = self.path.split_last()?;
        Some(Self::new(self.owner_id.clone(), self.group_id, rest.to_vec()))
    }

    /// Iterates over the parent, grandparent, ... up to and including the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.path.len())
            .rev()
            .map(|len| Self::new(self.owner_id.clone(), self.group_id, self.path[..len].to_vec()))
    }

    /// The address one step below this one. No validation is performed.
    pub fn child(&self, direction: Direction) -> Coord {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(direction);
        Self::new(self.owner_id.clone(), self.group_id, path)
    }

    /// The structural children in canonical order.
    ///
    /// With `include_composition`, the composition slot comes first, followed
    /// by the six structural children. Composed children are never included;
    /// use [`Coord::composed_children`] for those.
    pub fn children(&self, include_composition: bool) -> Vec<Coord> {
        let composition = include_composition.then_some(Direction::CENTER);
        composition
            .into_iter()
            .chain(Direction::STRUCTURAL)
            .map(|direction| self.child(direction))
            .collect()
    }

    /// The six composed children, `-1` through `-6`.
    pub fn composed_children(&self) -> Vec<Coord> {
        Direction::COMPOSED
            .iter()
            .map(|direction| self.child(*direction))
            .collect()
    }

    /// The composition slot below this address.
    pub fn composition(&self) -> Coord {
        self.child(Direction::CENTER)
    }

    /// Returns `true` if `ancestor` is a strict prefix of this address in the same space.
    ///
    /// Prefix matching is purely structural: the sign of the differing steps
    /// does not matter.
    pub fn is_descendant_of(&self, ancestor: &Coord) -> bool {
        self.same_space(ancestor)
            && self.path.len() > ancestor.path.len()
            && self.path.starts_with(&ancestor.path)
    }

    /// Returns `true` if this address is a strict prefix of `descendant`.
    pub fn is_ancestor_of(&self, descendant: &Coord) -> bool {
        descendant.is_descendant_of(self)
    }

    /// Sibling addresses of the same family, excluding this one.
    ///
    /// Structural nodes are siblings with the other structural children of
    /// their parent and composed nodes with the other composed children. The
    /// root, composition slots and out-of-range steps have no siblings.
    pub fn siblings(&self) -> Vec<Coord> {
        let Some(parent) = self.parent() else {
            return Vec::new();
        };
        let own = self.direction();
        let family: &[Direction] = if own.is_structural() {
            &Direction::STRUCTURAL
        } else if own.is_composed() {
            &Direction::COMPOSED
        } else {
            &[]
        };
        family
            .iter()
            .filter(|direction| **direction != own)
            .map(|direction| parent.child(*direction))
            .collect()
    }

    /// Returns `true` if any step of the path is composed.
    ///
    /// Anything nested below a composed branch counts, not only the direct
    /// composed child.
    pub fn is_composed_child(&self) -> bool {
        self.path.iter().any(|direction| direction.value() < 0)
    }

    /// Replaces the `old_prefix` part of this address with `new_prefix`.
    ///
    /// Returns `None` if `old_prefix` is not a (possibly equal) prefix of this
    /// address in the same space. The remainder of the path is kept as is.
    pub fn with_prefix_replaced(&self, old_prefix: &Coord, new_prefix: &Coord) -> Option<Coord> {
        if !self.same_space(old_prefix) || !self.path.starts_with(&old_prefix.path) {
            return None;
        }
        let mut path = new_prefix.path.clone();
        path.extend_from_slice(&self.path[old_prefix.path.len()..]);
        Some(Self::new(
            new_prefix.owner_id.clone(),
            new_prefix.group_id,
            path,
        ))
    }

    /// The string every descendant id starts with: this id followed by the
    /// separator that introduces the next step.
    pub fn descendant_prefix(&self) -> String {
        let separator = if self.is_root() {
            PATH_SEPARATOR
        } else {
            DIRECTION_SEPARATOR
        };
        format!("{self}{separator}")
    }

    /// The comma separated path, empty for the root.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(Direction::to_string)
            .collect::<Vec<_>>()
            .join(DIRECTION_SEPARATOR)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DIRECTION_SEPARATOR}{}", self.owner_id, self.group_id)?;
        if !self.path.is_empty() {
            write!(f, "{PATH_SEPARATOR}{}", self.path_string())?;
        }
        Ok(())
    }
}

/// Whether `token` is an integer written the way `Display` writes one: an
/// optional `-`, then digits without leading zeros. `-0` is not canonical.
fn is_canonical_integer(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    well_formed && token != "-0"
}

impl FromStr for Coord {
    type Err = CoordError;

    /// Parses the canonical string form.
    ///
    /// Only the syntax is checked. Direction values are not range checked, so
    /// `"1,0:-7"` parses with a `-7` step. Numbers must be written canonically
    /// (no `+`, no leading zeros, no `-0`), so each address has one spelling.
    /// A trailing `:` with nothing after it is accepted as the root.
    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let (base, path) = match id.split_once(PATH_SEPARATOR) {
            Some((base, path)) => (base, path),
            None => (id, ""),
        };

        let (owner_id, group_id) = base
            .rsplit_once(DIRECTION_SEPARATOR)
            .ok_or_else(|| CoordError::malformed(id, "missing group id"))?;
        if owner_id.is_empty() {
            return Err(CoordError::malformed(id, "empty owner id"));
        }
        if !is_canonical_integer(group_id) {
            return Err(CoordError::malformed(
                id,
                format!("non-canonical group id '{group_id}'"),
            ));
        }
        let group_id = group_id
            .parse::<i64>()
            .map_err(|e| CoordError::malformed(id, format!("invalid group id '{group_id}': {e}")))?;

        let path = if path.is_empty() {
            Vec::new()
        } else {
            path.split(DIRECTION_SEPARATOR)
                .map(|token| {
                    if !is_canonical_integer(token) {
                        return Err(CoordError::malformed(
                            id,
                            format!("non-canonical direction '{token}'"),
                        ));
                    }
                    token.parse::<i32>().map(Direction::new).map_err(|e| {
                        CoordError::malformed(id, format!("invalid direction '{token}': {e}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Coord::new(owner_id, group_id, path))
    }
}

impl From<Coord> for String {
    fn from(coord: Coord) -> Self {
        coord.to_string()
    }
}

impl TryFrom<String> for Coord {
    type Error = CoordError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        id.parse()
    }
}

impl TryFrom<&str> for Coord {
    type Error = CoordError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        id.parse()
    }
}

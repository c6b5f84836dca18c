//! Address algebra keyed by the canonical string form.

use super::{Coord, CoordError, Direction};

/// Stateless address operations.
///
/// These mirror the [`Coord`] methods for callers that hold addresses as
/// strings (cache keys, URLs, persisted columns). Every operation is a pure
/// function of its arguments; id-taking operations fail only when an id is
/// syntactically malformed.
///
/// ```rust
/// use hexframe::CoordSystem;
///
/// let parent = CoordSystem::get_parent_coord_from_id("1,0:1,-2")?.unwrap();
/// assert_eq!(CoordSystem::create_id(&parent), "1,0:1");
/// assert!(CoordSystem::is_descendant("1,0:1,-2", "1,0")?);
/// # Ok::<(), hexframe::coord::CoordError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordSystem;

impl CoordSystem {
    /// Serializes an address to its canonical string form.
    pub fn create_id(coord: &Coord) -> String {
        coord.to_string()
    }

    /// Parses the canonical string form. Only syntax is validated.
    pub fn parse_id(id: &str) -> Result<Coord, CoordError> {
        id.parse()
    }

    pub fn get_parent_coord(coord: &Coord) -> Option<Coord> {
        coord.parent()
    }

    pub fn get_direction(coord: &Coord) -> Direction {
        coord.direction()
    }

    pub fn get_depth_from_id(id: &str) -> Result<usize, CoordError> {
        Ok(Self::parse_id(id)?.depth())
    }

    /// The six structural children, preceded by the composition slot when
    /// `include_composition` is set.
    pub fn get_child_coords(parent: &Coord, include_composition: bool) -> Vec<Coord> {
        parent.children(include_composition)
    }

    pub fn get_composed_child_coords(parent: &Coord) -> Vec<Coord> {
        parent.composed_children()
    }

    /// The composition slot below `parent`.
    ///
    /// Pure arithmetic: whether composition is allowed there is up to the
    /// validator.
    pub fn get_composition_coord(parent: &Coord) -> Coord {
        parent.composition()
    }

    /// Returns `true` if `candidate_id` lies strictly below `ancestor_id`.
    pub fn is_descendant(candidate_id: &str, ancestor_id: &str) -> Result<bool, CoordError> {
        let candidate = Self::parse_id(candidate_id)?;
        let ancestor = Self::parse_id(ancestor_id)?;
        Ok(candidate.is_descendant_of(&ancestor))
    }

    /// Returns `true` if `ancestor_id` lies strictly above `candidate_id`.
    pub fn is_ancestor(ancestor_id: &str, candidate_id: &str) -> Result<bool, CoordError> {
        Self::is_descendant(candidate_id, ancestor_id)
    }

    /// Ids of the same-family siblings of `id`, in canonical order.
    pub fn get_siblings_from_id(id: &str) -> Result<Vec<String>, CoordError> {
        Ok(Self::parse_id(id)?
            .siblings()
            .iter()
            .map(Self::create_id)
            .collect())
    }

    pub fn get_parent_coord_from_id(id: &str) -> Result<Option<Coord>, CoordError> {
        Ok(Self::parse_id(id)?.parent())
    }

    pub fn get_composition_coord_from_id(id: &str) -> Result<Coord, CoordError> {
        Ok(Self::parse_id(id)?.composition())
    }

    pub fn get_child_coords_from_id(
        id: &str,
        include_composition: bool,
    ) -> Result<Vec<Coord>, CoordError> {
        Ok(Self::parse_id(id)?.children(include_composition))
    }

    pub fn get_composed_child_coords_from_id(id: &str) -> Result<Vec<Coord>, CoordError> {
        Ok(Self::parse_id(id)?.composed_children())
    }

    /// Returns `true` if any step of the address is composed.
    pub fn is_composed_child(coord: &Coord) -> bool {
        coord.is_composed_child()
    }

    pub fn is_composed_child_id(id: &str) -> Result<bool, CoordError> {
        Ok(Self::parse_id(id)?.is_composed_child())
    }

    /// The string prefix shared by the ids of every descendant of `coord`.
    pub fn descendant_prefix(coord: &Coord) -> String {
        coord.descendant_prefix()
    }
}

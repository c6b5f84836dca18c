//! Constants used throughout the Hexframe library.
//!
//! Separators of the address wire format and the structural limits enforced by
//! the validator live here.

/// Separates the `owner,group` base of an address from its path.
pub const PATH_SEPARATOR: &str = ":";

/// Separates owner from group, and path steps from each other.
pub const DIRECTION_SEPARATOR: &str = ",";

/// Maximum number of direct children without a composition slot.
pub const MAX_STRUCTURAL_NEIGHBORS: usize = 6;

/// Maximum number of direct children when one fills the composition slot.
pub const MAX_NEIGHBORS_WITH_COMPOSITION: usize = 7;

/// Default file name of the SQLite database used by the CLI.
pub const SQLITE_FILE: &str = "hexframe.db";

/// Default file name of the in-memory store snapshot used by the CLI.
pub const SNAPSHOT_FILE: &str = "hexframe.json";

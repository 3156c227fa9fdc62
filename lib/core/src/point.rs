use serde::{Deserialize, Serialize};
use crate::vector::Vector;

/// Stable identifier of a catalog row
///
/// Assigned in file order when the catalog is loaded and carried by both the
/// original record and its standardized vector, so the two representations
/// are joined by identity instead of by position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u32);

impl RowId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RowId {
    fn from(i: u32) -> Self {
        RowId(i)
    }
}

/// A vector in the index tagged with the row it was computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub id: RowId,
    pub vector: Vector,
}

impl Point {
    #[inline]
    #[must_use]
    pub fn new(id: RowId, vector: Vector) -> Self {
        Self { id, vector }
    }
}

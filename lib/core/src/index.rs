use crate::{Error, Point, Result, RowId, Vector};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// A single nearest-neighbor hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub id: RowId,
    pub distance: f64,
}

/// Exact nearest-neighbor index over a fixed set of points
///
/// Searches by linear scan with plain Euclidean distance. Points keep their
/// insertion order, which is also the tie-break order for equal distances.
/// The index has no mutating methods once built.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    dim: usize,
    points: Vec<Point>,
}

impl NeighborIndex {
    /// Build an index from points that all have dimension `dim`
    pub fn build(dim: usize, points: Vec<Point>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidArgument(
                "index dimension must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if point.vector.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: point.vector.dim(),
                });
            }
            if !point.vector.is_finite() {
                return Err(Error::InvalidArgument(format!(
                    "row {} has a non-finite component",
                    point.id
                )));
            }
            if !seen.insert(point.id) {
                return Err(Error::InvalidArgument(format!(
                    "row {} appears more than once",
                    point.id
                )));
            }
        }

        debug!(dim, points = points.len(), "built neighbor index");
        Ok(Self { dim, points })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Find exactly `k` nearest points, closest first
    ///
    /// Fails if `k` is zero or larger than the number of indexed points.
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 || k > self.points.len() {
            return Err(Error::InvalidArgument(format!(
                "k must be between 1 and {}, got {}",
                self.points.len(),
                k
            )));
        }
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }
        if !query.is_finite() {
            return Err(Error::InvalidArgument(
                "query vector has a non-finite component".to_string(),
            ));
        }

        // (squared distance, insertion position) gives a total order with
        // ties resolved by catalog order
        let mut scored: Vec<(OrderedFloat<f64>, usize)> = self
            .points
            .iter()
            .enumerate()
            .map(|(pos, point)| (OrderedFloat(point.vector.l2_distance_squared(query)), pos))
            .collect();

        if k < scored.len() {
            scored.select_nth_unstable(k - 1);
            scored.truncate(k);
        }
        scored.sort_unstable();

        Ok(scored
            .into_iter()
            .map(|(dist_sq, pos)| Neighbor {
                id: self.points[pos].id,
                distance: dist_sq.into_inner().sqrt(),
            })
            .collect())
    }
}

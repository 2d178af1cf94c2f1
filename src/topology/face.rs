use std::cmp::Ordering;

use crate::error::ArrangementError;
use crate::geometry::CurveDomain;
use crate::math::coord::cross;
use crate::math::polygon_2d::crossing_contains;
use crate::math::Coord;

use super::edge::HalfId;

/// One half-edge of a [`CutLoop`], copied out of the arrangement graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopEdge<D> {
    pub half: HalfId,
    pub start: Coord,
    pub end: Coord,
    /// Parameter range on the parent curve, oriented along this half-edge:
    /// a backward traversal has `t_min > t_max`.
    pub range: CurveDomain,
    /// Provenance of the segment; `None` for synthetic connectors.
    pub data: Option<D>,
    pub forward: bool,
}

/// A closed circuit of half-edges bounding one face of the arrangement.
///
/// Twice the signed area and the bounding box are computed once at
/// construction. A non-negative area means counter-clockwise winding. Among
/// the loops of one arrangement, the one with the largest negative area is
/// the unbounded outer boundary.
#[derive(Debug, Clone)]
pub struct CutLoop<D> {
    edges: Vec<LoopEdge<D>>,
    twice_area: i128,
    min: Coord,
    max: Coord,
}

impl<D> CutLoop<D> {
    /// Builds a loop from its half-edges in traversal order.
    ///
    /// # Errors
    ///
    /// Returns `ArrangementError::EmptyLoop` if `edges` is empty.
    pub fn new(edges: Vec<LoopEdge<D>>) -> Result<Self, ArrangementError> {
        let first = edges.first().ok_or(ArrangementError::EmptyLoop)?.start;
        let mut min = first;
        let mut max = first;
        let mut twice_area = 0_i128;
        for edge in &edges {
            let (a, b) = (edge.start, edge.end);
            min = Coord::new(min.x.min(b.x), min.y.min(b.y));
            max = Coord::new(max.x.max(b.x), max.y.max(b.y));
            twice_area += cross(a.delta_from(first), b.delta_from(first));
        }
        Ok(Self {
            edges,
            twice_area,
            min,
            max,
        })
    }

    /// The half-edges in traversal order.
    #[must_use]
    pub fn edges(&self) -> &[LoopEdge<D>] {
        &self.edges
    }

    /// Number of half-edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always `false`; loops hold at least one half-edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Start coordinate of every half-edge, in order.
    pub fn vertices(&self) -> impl Iterator<Item = Coord> + '_ {
        self.edges.iter().map(|e| e.start)
    }

    /// Twice the signed area, exact.
    #[must_use]
    pub fn twice_area(&self) -> i128 {
        self.twice_area
    }

    /// Signed area in grid units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn area(&self) -> f64 {
        self.twice_area as f64 * 0.5
    }

    /// Whether the loop winds counter-clockwise (area ≥ 0).
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.twice_area >= 0
    }

    /// Orders larger |area| first; on ties clockwise loops come before
    /// counter-clockwise ones.
    #[must_use]
    pub fn cmp_by_area(&self, other: &Self) -> Ordering {
        other
            .twice_area
            .abs()
            .cmp(&self.twice_area.abs())
            .then(self.is_ccw().cmp(&other.is_ccw()))
    }

    /// Whether `(px, py)` lies inside the loop's polygon, by crossing number.
    /// Winding is ignored.
    #[must_use]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        crossing_contains(self.edges.iter().map(|e| (e.start, e.end)), px, py)
    }

    /// Inclusive bounding box as `(min, max)` corners.
    #[must_use]
    pub fn bounding_box(&self) -> (Coord, Coord) {
        (self.min, self.max)
    }

    /// Whether this loop's bounding box encloses `other`'s (inclusive).
    #[must_use]
    pub fn bounding_box_contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Index of the unbounded outer boundary: the loop with the largest
    /// negative area.
    #[must_use]
    pub fn outer_boundary(loops: &[Self]) -> Option<usize> {
        loops
            .iter()
            .enumerate()
            .filter(|(_, l)| l.twice_area < 0)
            .min_by_key(|(_, l)| l.twice_area)
            .map(|(i, _)| i)
    }
}

mod flatten_curve;

pub use flatten_curve::FlattenCurve;

use crate::geometry::CurveDomain;
use crate::math::{Coord, Point2};
use crate::topology::Segment;

/// Parameters controlling curve flattening.
#[derive(Debug, Clone, Copy)]
pub struct FlattenParams {
    /// Maximum allowed squared deviation between a curve piece and its chord.
    pub tolerance: f64,
    /// Maximum subdivision depth; pieces at this depth are emitted as-is.
    pub max_depth: usize,
}

impl Default for FlattenParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_depth: 16,
        }
    }
}

/// One straight piece of a flattened curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatSegment {
    /// Parameter sub-range of the parent curve this piece covers.
    pub range: CurveDomain,
    pub start: Point2,
    pub end: Point2,
}

impl FlatSegment {
    /// Snaps the piece onto the fixed-point grid (`round(v * scale)`) as an
    /// arrangement segment carrying `data`.
    ///
    /// Returns `None` if both endpoints land on the same grid point.
    #[must_use]
    pub fn quantize<D>(&self, scale: f64, data: D) -> Option<Segment<D>> {
        let start = Coord::from_f64(self.start.x, self.start.y, scale);
        let end = Coord::from_f64(self.end.x, self.end.y, scale);
        if start == end {
            return None;
        }
        Some(Segment::new(start, end, self.range, data))
    }
}

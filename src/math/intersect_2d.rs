use super::coord::{cross, dot, Coord};

/// How two closed segments relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRelation {
    /// No common point.
    Disjoint,
    /// Common points only at an endpoint of at least one segment.
    Touching,
    /// Transversal crossing strictly inside both segments.
    Crossing,
    /// Colinear with a shared stretch reaching past an endpoint.
    Overlapping,
}

impl SegmentRelation {
    /// Whether the relation makes the pair unusable in a planar graph.
    #[must_use]
    pub fn collides(self) -> bool {
        matches!(self, Self::Crossing | Self::Overlapping)
    }
}

/// Exact classification of segment `a0-a1` against segment `b0-b1`.
///
/// Parallel pairs are tested for colinearity, then each endpoint is projected
/// onto the other segment; a projection strictly inside `(0, 1)` is an overlap.
/// Non-parallel pairs solve the 2x2 system for the two intersection fractions
/// and report a crossing only when both are strictly inside `(0, 1)`.
#[must_use]
pub fn classify_segments(a0: Coord, a1: Coord, b0: Coord, b1: Coord) -> SegmentRelation {
    let da = a1.delta_from(a0);
    let db = b1.delta_from(b0);
    let e = b0.delta_from(a0);
    let den = cross(da, db);

    if den == 0 {
        if cross(da, e) != 0 {
            return SegmentRelation::Disjoint;
        }
        if (a0 == b0 && a1 == b1) || (a0 == b1 && a1 == b0) {
            return SegmentRelation::Overlapping;
        }
        let inside = strictly_between(b0, a0, a1)
            || strictly_between(b1, a0, a1)
            || strictly_between(a0, b0, b1)
            || strictly_between(a1, b0, b1);
        if inside {
            return SegmentRelation::Overlapping;
        }
        if a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1 {
            return SegmentRelation::Touching;
        }
        return SegmentRelation::Disjoint;
    }

    let (mut t_num, mut u_num, mut den) = (cross(e, db), cross(e, da), den);
    if den < 0 {
        t_num = -t_num;
        u_num = -u_num;
        den = -den;
    }

    let t_open = 0 < t_num && t_num < den;
    let u_open = 0 < u_num && u_num < den;
    if t_open && u_open {
        return SegmentRelation::Crossing;
    }
    let t_closed = 0 <= t_num && t_num <= den;
    let u_closed = 0 <= u_num && u_num <= den;
    if t_closed && u_closed {
        SegmentRelation::Touching
    } else {
        SegmentRelation::Disjoint
    }
}

/// Whether `p` lies on segment `a-b` strictly between its endpoints.
#[must_use]
pub fn strictly_between(p: Coord, a: Coord, b: Coord) -> bool {
    let d = b.delta_from(a);
    let v = p.delta_from(a);
    if cross(d, v) != 0 {
        return false;
    }
    let along = dot(v, d);
    0 < along && along < dot(d, d)
}

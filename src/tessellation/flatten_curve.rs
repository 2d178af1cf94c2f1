use tracing::trace;

use crate::error::{Result, TessellationError};
use crate::geometry::{CurveDomain, ParametricCurve};
use crate::math::TOLERANCE;

use super::{FlatSegment, FlattenParams};

/// Flattens a parametric curve into line segments within a flatness tolerance.
///
/// # Algorithm
///
/// A piece whose flatness estimate is within `tolerance` is emitted as one
/// segment. Otherwise it is split at its own `t = 0.5` and both halves are
/// processed with halved parameter ranges. Subdivision runs on an explicit
/// worklist and stops at `max_depth`. Zero-length pieces are dropped.
pub struct FlattenCurve<'a, C> {
    curve: &'a C,
    params: FlattenParams,
}

impl<'a, C: ParametricCurve + Clone> FlattenCurve<'a, C> {
    /// Creates a new `FlattenCurve` operation.
    #[must_use]
    pub fn new(curve: &'a C, params: FlattenParams) -> Self {
        Self { curve, params }
    }

    /// Executes the flattening, returning segments ordered from `t = 0` to
    /// `t = 1`.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if the tolerance is
    /// negative or not finite.
    pub fn execute(&self) -> Result<Vec<FlatSegment>> {
        let tolerance = self.params.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(TessellationError::InvalidParameters(format!(
                "flatness tolerance must be finite and non-negative, got {tolerance}"
            ))
            .into());
        }

        let mut segments = Vec::new();
        let mut stack = vec![(self.curve.clone(), CurveDomain::unit(), 0_usize)];

        while let Some((piece, range, depth)) = stack.pop() {
            if depth >= self.params.max_depth || piece.flatness() <= tolerance {
                let start = piece.start_point();
                let end = piece.end_point();
                if (end - start).norm_squared() > TOLERANCE * TOLERANCE {
                    segments.push(FlatSegment { range, start, end });
                }
                continue;
            }
            let (left, right) = piece.split_at(0.5);
            let (left_range, right_range) = range.halves();
            // Right first so the left half is popped next.
            stack.push((right, right_range, depth + 1));
            stack.push((left, left_range, depth + 1));
        }

        trace!(segments = segments.len(), "flattened curve");
        Ok(segments)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{ArcSegment, Bezier};
    use crate::math::polygon_2d::signed_area_2d;
    use crate::math::{Point2, PointN};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn arch() -> Bezier {
        Bezier::cubic(
            PointN::xy(0.0, 0.0),
            PointN::xy(0.0, 10.0),
            PointN::xy(10.0, 10.0),
            PointN::xy(10.0, 0.0),
        )
    }

    #[test]
    fn line_is_one_segment() {
        let line = Bezier::line(PointN::xy(0.0, 0.0), PointN::xy(3.0, 4.0));
        let segs = FlattenCurve::new(&line, FlattenParams::default()).execute().unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].range, CurveDomain::unit());
        assert_eq!(segs[0].end, Point2::new(3.0, 4.0));
    }

    #[test]
    fn pieces_are_contiguous_and_ordered() {
        let segs = FlattenCurve::new(&arch(), FlattenParams::default()).execute().unwrap();
        assert!(segs.len() > 4);
        assert_abs_diff_eq!(segs[0].range.t_min, 0.0);
        assert_abs_diff_eq!(segs[segs.len() - 1].range.t_max, 1.0);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_abs_diff_eq!(pair[0].range.t_max, pair[1].range.t_min);
        }
    }

    #[test]
    fn pieces_stay_within_tolerance() {
        let curve = arch();
        let params = FlattenParams {
            tolerance: 0.01,
            max_depth: 20,
        };
        let segs = FlattenCurve::new(&curve, params).execute().unwrap();
        for seg in &segs {
            let mid_t = seg.range.mid();
            let on_curve = curve.evaluate_2d(mid_t);
            let chord = seg.end - seg.start;
            let v = on_curve - seg.start;
            let t = (v.dot(&chord) / chord.norm_squared()).clamp(0.0, 1.0);
            let dev_sq = (v - chord * t).norm_squared();
            assert!(dev_sq <= params.tolerance + 1e-12, "deviation {dev_sq}");
        }
    }

    #[test]
    fn tighter_tolerance_gives_more_pieces() {
        let coarse = FlattenCurve::new(&arch(), FlattenParams { tolerance: 1.0, max_depth: 16 })
            .execute()
            .unwrap();
        let fine = FlattenCurve::new(&arch(), FlattenParams { tolerance: 1e-4, max_depth: 16 })
            .execute()
            .unwrap();
        assert!(fine.len() > coarse.len());
    }

    #[test]
    fn depth_cap_bounds_output() {
        let params = FlattenParams {
            tolerance: 0.0,
            max_depth: 3,
        };
        let segs = FlattenCurve::new(&arch(), params).execute().unwrap();
        assert_eq!(segs.len(), 8);
    }

    #[test]
    fn degenerate_curve_yields_nothing() {
        let p = PointN::xy(1.0, 1.0);
        let dot = Bezier::cubic(p.clone(), p.clone(), p.clone(), p);
        let segs = FlattenCurve::new(&dot, FlattenParams::default()).execute().unwrap();
        assert!(segs.is_empty());
    }

    #[test]
    fn rejects_negative_tolerance() {
        let params = FlattenParams {
            tolerance: -1.0,
            max_depth: 4,
        };
        assert!(FlattenCurve::new(&arch(), params).execute().is_err());
    }

    #[test]
    fn full_circle_area() {
        let circle = ArcSegment::new(Point2::origin(), 1.0, 0.0, 2.0 * PI).unwrap();
        let params = FlattenParams {
            tolerance: 1e-8,
            max_depth: 16,
        };
        let segs = FlattenCurve::new(&circle, params).execute().unwrap();
        let polygon: Vec<Point2> = segs.iter().map(|s| s.start).collect();
        assert_abs_diff_eq!(signed_area_2d(&polygon), PI, epsilon = 1e-3);
    }
}

use crate::error::{GeometryError, Result};
use crate::math::{Point2, PointN};

use super::ParametricCurve;

/// A Bezier curve with 1 to 4 control points in N dimensions.
///
/// Two points form a line, three a quadratic and four a cubic. A single point
/// is the constant curve produced by differentiating a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier {
    points: Vec<PointN>,
}

impl Bezier {
    /// Creates a curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ControlPointCount` unless there are 1 to 4
    /// points, and `GeometryError::MixedDimensions` if they differ in
    /// dimension.
    pub fn new(points: Vec<PointN>) -> Result<Self> {
        if points.is_empty() || points.len() > 4 {
            return Err(GeometryError::ControlPointCount(points.len()).into());
        }
        let expected = points[0].dim();
        if let Some(p) = points.iter().find(|p| p.dim() != expected) {
            return Err(GeometryError::MixedDimensions {
                expected,
                found: p.dim(),
            }
            .into());
        }
        Ok(Self { points })
    }

    /// A straight line from `a` to `b`. Both must share a dimension.
    #[must_use]
    pub fn line(a: PointN, b: PointN) -> Self {
        Self { points: vec![a, b] }
    }

    /// A cubic from four control points. All must share a dimension.
    #[must_use]
    pub fn cubic(p0: PointN, p1: PointN, p2: PointN, p3: PointN) -> Self {
        Self {
            points: vec![p0, p1, p2, p3],
        }
    }

    /// The control points.
    #[must_use]
    pub fn points(&self) -> &[PointN] {
        &self.points
    }

    /// First control point, where the curve starts.
    #[must_use]
    pub fn start(&self) -> &PointN {
        &self.points[0]
    }

    /// Last control point, where the curve ends.
    #[must_use]
    pub fn end(&self) -> &PointN {
        &self.points[self.points.len() - 1]
    }

    /// Polynomial degree: control point count minus one.
    #[must_use]
    pub fn order(&self) -> usize {
        self.points.len() - 1
    }

    /// Dimension of the control points.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.points[0].dim()
    }

    /// Whether this is a two-point line.
    #[must_use]
    pub fn is_line(&self) -> bool {
        self.points.len() == 2
    }

    /// Evaluates the curve at `t` with de Casteljau's algorithm.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> PointN {
        if let [p0, p1, p2, p3] = self.points.as_slice() {
            // Direct Bernstein form for the hot cubic case.
            let mt = 1.0 - t;
            let b0 = mt * mt * mt;
            let b1 = 3.0 * mt * mt * t;
            let b2 = 3.0 * mt * t * t;
            let b3 = t * t * t;
            return p0 * b0 + p1 * b1 + p2 * b2 + p3 * b3;
        }
        let mut work = self.points.clone();
        for level in 1..work.len() {
            for i in 0..work.len() - level {
                work[i] = work[i].lerp(&work[i + 1], t);
            }
        }
        work.swap_remove(0)
    }

    /// Splits at `t` into two curves of the same order covering `[0, t]` and
    /// `[t, 1]`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let n = self.points.len();
        let mut work = self.points.clone();
        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        left.push(work[0].clone());
        right.push(work[n - 1].clone());
        for level in 1..n {
            for i in 0..n - level {
                work[i] = work[i].lerp(&work[i + 1], t);
            }
            left.push(work[0].clone());
            right.push(work[n - 1 - level].clone());
        }
        right.reverse();
        (Self { points: left }, Self { points: right })
    }

    /// The hodograph: a curve one order lower describing `dB/dt`.
    ///
    /// Differentiating a constant curve yields the zero constant.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let n = self.points.len();
        if n == 1 {
            return Self {
                points: vec![PointN::zeros(self.dim())],
            };
        }
        #[allow(clippy::cast_precision_loss)]
        let order = (n - 1) as f64;
        let points = self
            .points
            .windows(2)
            .map(|w| (&w[1] - &w[0]).scale(order))
            .collect();
        Self { points }
    }

    /// Returns the same curve traversed end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}

impl ParametricCurve for Bezier {
    fn evaluate_2d(&self, t: f64) -> Point2 {
        let p = self.evaluate(t);
        Point2::new(p.x(), p.y())
    }

    fn split_at(&self, t: f64) -> (Self, Self) {
        self.split(t)
    }

    /// Largest squared distance from an interior control point to the chord.
    /// The convex hull property makes this an upper bound on the deviation.
    fn flatness(&self) -> f64 {
        let a = Point2::new(self.start().x(), self.start().y());
        let b = Point2::new(self.end().x(), self.end().y());
        let chord = b - a;
        let len_sq = chord.norm_squared();
        let interior = &self.points[1..self.points.len().saturating_sub(1).max(1)];
        interior
            .iter()
            .map(|p| {
                let v = Point2::new(p.x(), p.y()) - a;
                if len_sq < 1e-20 {
                    return v.norm_squared();
                }
                let t = (v.dot(&chord) / len_sq).clamp(0.0, 1.0);
                (v - chord * t).norm_squared()
            })
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sample_cubic() -> Bezier {
        Bezier::cubic(
            PointN::xy(0.0, 0.0),
            PointN::xy(1.0, 2.0),
            PointN::xy(3.0, 2.0),
            PointN::xy(4.0, 0.0),
        )
    }

    #[test]
    fn rejects_bad_control_points() {
        assert!(Bezier::new(vec![]).is_err());
        assert!(Bezier::new(vec![PointN::xy(0.0, 0.0); 5]).is_err());
        assert!(Bezier::new(vec![PointN::xy(0.0, 0.0), PointN::new(vec![1.0, 2.0, 3.0])]).is_err());
        assert!(Bezier::new(vec![PointN::xy(0.0, 0.0), PointN::xy(1.0, 0.0)]).is_ok());
    }

    #[test]
    fn cubic_endpoints_and_midpoint() {
        let c = sample_cubic();
        assert_eq!(c.evaluate(0.0), PointN::xy(0.0, 0.0));
        assert_eq!(c.evaluate(1.0), PointN::xy(4.0, 0.0));
        let m = c.evaluate(0.5);
        assert_relative_eq!(m.x(), 2.0);
        assert_relative_eq!(m.y(), 1.5);
    }

    #[test]
    fn quadratic_matches_de_casteljau() {
        let q = Bezier::new(vec![
            PointN::xy(0.0, 0.0),
            PointN::xy(1.0, 2.0),
            PointN::xy(2.0, 0.0),
        ])
        .unwrap();
        let m = q.evaluate(0.5);
        assert_relative_eq!(m.x(), 1.0);
        assert_relative_eq!(m.y(), 1.0);
    }

    #[test]
    fn split_halves_meet_and_agree() {
        let c = sample_cubic();
        let (l, r) = c.split(0.3);
        assert_eq!(l.order(), 3);
        assert_eq!(r.order(), 3);
        assert_eq!(l.end(), r.start());
        for &s in &[0.0, 0.25, 0.5, 1.0] {
            let expected = c.evaluate(0.3 * s);
            let got = l.evaluate(s);
            assert_abs_diff_eq!(got.x(), expected.x(), epsilon = 1e-12);
            assert_abs_diff_eq!(got.y(), expected.y(), epsilon = 1e-12);
            let expected = c.evaluate(0.3 + 0.7 * s);
            let got = r.evaluate(s);
            assert_abs_diff_eq!(got.x(), expected.x(), epsilon = 1e-12);
            assert_abs_diff_eq!(got.y(), expected.y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn derivative_orders() {
        let c = sample_cubic();
        let d1 = c.derivative();
        assert_eq!(d1.order(), 2);
        assert_eq!(d1.evaluate(0.0), PointN::xy(3.0, 6.0));
        let d2 = d1.derivative();
        assert_eq!(d2.order(), 1);
        let d3 = d2.derivative();
        assert_eq!(d3.order(), 0);
        assert_eq!(d3.derivative().evaluate(0.5), PointN::xy(0.0, 0.0));
    }

    #[test]
    fn flatness_of_line_is_zero() {
        let l = Bezier::line(PointN::xy(0.0, 0.0), PointN::xy(5.0, 5.0));
        assert_relative_eq!(l.flatness(), 0.0);
        assert_relative_eq!(sample_cubic().flatness(), 4.0);
    }

    #[test]
    fn works_in_three_dimensions() {
        let c = Bezier::line(PointN::new(vec![0.0, 0.0, 1.0]), PointN::new(vec![2.0, 0.0, 3.0]));
        assert_eq!(c.evaluate(0.5), PointN::new(vec![1.0, 0.0, 2.0]));
        assert_eq!(c.reversed().start(), &PointN::new(vec![2.0, 0.0, 3.0]));
    }
}

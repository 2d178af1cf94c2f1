mod arc;
mod bezier;

pub use arc::ArcSegment;
pub use bezier::Bezier;

use crate::math::Point2;

/// Parameter sub-range `[t_min, t_max]` on a parent curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The whole `[0, 1]` range.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Parameter halfway through the range.
    #[must_use]
    pub fn mid(&self) -> f64 {
        0.5 * (self.t_min + self.t_max)
    }

    /// The two halves `[t_min, mid]` and `[mid, t_max]`.
    #[must_use]
    pub fn halves(&self) -> (Self, Self) {
        let mid = self.mid();
        (Self::new(self.t_min, mid), Self::new(mid, self.t_max))
    }

    /// The same range traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.t_max, self.t_min)
    }
}

impl Default for CurveDomain {
    fn default() -> Self {
        Self::unit()
    }
}

/// A curve over `t ∈ [0, 1]` that can be flattened into line segments.
///
/// Evaluation is projected onto the XY plane; higher-dimensional curves
/// flatten by their first two components.
pub trait ParametricCurve: Sized {
    /// Evaluates the curve at parameter `t`.
    fn evaluate_2d(&self, t: f64) -> Point2;

    /// Splits the curve at `t` into `[0, t]` and `[t, 1]`, each
    /// reparameterized to `[0, 1]`.
    fn split_at(&self, t: f64) -> (Self, Self);

    /// Squared estimate of the maximum deviation between the curve and its
    /// chord.
    fn flatness(&self) -> f64;

    /// Start point, `evaluate_2d(0.0)`.
    fn start_point(&self) -> Point2 {
        self.evaluate_2d(0.0)
    }

    /// End point, `evaluate_2d(1.0)`.
    fn end_point(&self) -> Point2 {
        self.evaluate_2d(1.0)
    }
}

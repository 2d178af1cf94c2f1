use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_from_bulge, arc_point_at, arc_sagitta, ArcGeometry};
use crate::math::{Point2, TOLERANCE};

use super::ParametricCurve;

/// A circular arc in the XY plane.
///
/// The parametric form sweeps from `start_angle` by `sweep` radians as `t`
/// goes from 0 to 1; a positive sweep runs counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    geometry: ArcGeometry,
}

impl ArcSegment {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive or
    /// the sweep is zero.
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }
        Ok(Self {
            geometry: ArcGeometry {
                center,
                radius,
                start_angle,
                sweep,
            },
        })
    }

    /// Creates the arc from `p0` to `p1` described by a bulge value
    /// (`tan(sweep / 4)`).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a zero-length chord or a zero
    /// bulge.
    pub fn from_bulge(p0: Point2, p1: Point2, bulge: f64) -> Result<Self> {
        let geometry = arc_from_bulge(p0, p1, bulge).ok_or_else(|| {
            GeometryError::Degenerate("bulge arc has no curvature or no chord".into())
        })?;
        Ok(Self { geometry })
    }

    /// Center of the supporting circle.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.geometry.center
    }

    /// Radius of the supporting circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.geometry.radius
    }

    /// Signed angular extent in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.geometry.sweep
    }
}

impl ParametricCurve for ArcSegment {
    fn evaluate_2d(&self, t: f64) -> Point2 {
        arc_point_at(&self.geometry, t)
    }

    fn split_at(&self, t: f64) -> (Self, Self) {
        let g = self.geometry;
        let first = ArcGeometry {
            sweep: g.sweep * t,
            ..g
        };
        let second = ArcGeometry {
            start_angle: g.start_angle + g.sweep * t,
            sweep: g.sweep * (1.0 - t),
            ..g
        };
        (Self { geometry: first }, Self { geometry: second })
    }

    fn flatness(&self) -> f64 {
        arc_sagitta(self.geometry.radius, self.geometry.sweep).powi(2)
    }
}

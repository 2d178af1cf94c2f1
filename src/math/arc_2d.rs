/// 2D circular arc math.
///
/// Bulge convention: `bulge = tan(sweep / 4)`.
/// - `bulge > 0`: counter-clockwise arc
/// - `bulge < 0`: clockwise arc
/// - `|bulge| = 1`: semicircle
use std::f64::consts::PI;

use super::Point2;

/// Center-radius-angle description of an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point2,
    pub radius: f64,
    /// Angle of the start point around the center, in radians.
    pub start_angle: f64,
    /// Signed angular extent, positive for CCW.
    pub sweep: f64,
}

/// Converts a bulge-encoded arc from `p0` to `p1` to center-radius-angle form.
///
/// Returns `None` for a zero-length chord or a (near) zero bulge, both of
/// which describe a straight line rather than an arc.
#[must_use]
pub fn arc_from_bulge(p0: Point2, p1: Point2, bulge: f64) -> Option<ArcGeometry> {
    let d = p1 - p0;
    let chord_len = d.norm();
    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return None;
    }

    // Center sits on the chord's perpendicular bisector, left of the chord for
    // positive bulge.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = nalgebra::center(&p0, &p1);
    let normal = nalgebra::Vector2::new(-d.y, d.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);
    let sweep = (4.0 * bulge.atan()).clamp(-2.0 * PI, 2.0 * PI);

    Some(ArcGeometry {
        center,
        radius,
        start_angle,
        sweep,
    })
}

/// Point on the arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(arc: &ArcGeometry, t: f64) -> Point2 {
    let angle = arc.start_angle + arc.sweep * t;
    Point2::new(
        arc.center.x + arc.radius * angle.cos(),
        arc.center.y + arc.radius * angle.sin(),
    )
}

/// Maximum distance between the arc and its chord.
#[must_use]
pub fn arc_sagitta(radius: f64, sweep: f64) -> f64 {
    let half = (sweep.abs() * 0.5).min(PI);
    radius * (1.0 - half.cos())
}

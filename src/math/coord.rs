use super::Point2;

/// Exact 2D integer coordinate used as a vertex key in the arrangement graph.
///
/// Equality is exact, so coincident segment endpoints merge into one vertex.
/// Components should stay within [`Coord::LIMIT`] so every cross product of
/// two coordinate differences fits an `i128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    /// Largest magnitude a component may have for exact predicates.
    pub const LIMIT: i64 = 1 << 60;

    /// Creates a coordinate from integer components.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Quantizes a floating-point location onto the fixed-point grid
    /// `round(v * scale)`, clamped to [`Coord::LIMIT`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_f64(x: f64, y: f64, scale: f64) -> Self {
        let limit = Self::LIMIT as f64;
        let q = |v: f64| (v * scale).round().clamp(-limit, limit) as i64;
        Self { x: q(x), y: q(y) }
    }

    /// Whether both components lie within `±LIMIT`.
    #[must_use]
    pub fn in_range(self) -> bool {
        let range = -Self::LIMIT..=Self::LIMIT;
        range.contains(&self.x) && range.contains(&self.y)
    }

    /// Maps the coordinate back to floating point by dividing by `scale`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self, scale: f64) -> Point2 {
        Point2::new(self.x as f64 / scale, self.y as f64 / scale)
    }

    /// Difference `self - origin` widened to `i128`.
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (i128, i128) {
        (
            i128::from(self.x) - i128::from(origin.x),
            i128::from(self.y) - i128::from(origin.y),
        )
    }
}

/// Exact 2D cross product of two widened differences.
#[must_use]
pub fn cross(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.1 - a.1 * b.0
}

/// Exact 2D dot product of two widened differences.
#[must_use]
pub fn dot(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.0 + a.1 * b.1
}

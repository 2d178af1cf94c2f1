use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::DVector;

use super::TOLERANCE;

/// An immutable N-dimensional point (or vector) of real numbers.
///
/// The same type carries 2D device geometry and extra fitted channels such as
/// pen pressure, so the dimension is a runtime property. Arithmetic between
/// points of different dimension is a caller bug; the operators panic on it the
/// same way `nalgebra` does.
#[derive(Debug, Clone, PartialEq)]
pub struct PointN(DVector<f64>);

impl PointN {
    /// Creates a point from its components.
    #[must_use]
    pub fn new(coords: Vec<f64>) -> Self {
        Self(DVector::from_vec(coords))
    }

    /// Creates a 2D point.
    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self(DVector::from_column_slice(&[x, y]))
    }

    /// Creates a point by copying a slice of components.
    #[must_use]
    pub fn from_slice(coords: &[f64]) -> Self {
        Self(DVector::from_column_slice(coords))
    }

    /// The all-zero point of dimension `dim`.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self(DVector::zeros(dim))
    }

    /// Number of components.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// The components as a slice.
    #[must_use]
    pub fn coords(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// First component, or `0.0` for an empty point.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0.get(0).copied().unwrap_or(0.0)
    }

    /// Second component, or `0.0` when the point has fewer than two.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.0.get(1).copied().unwrap_or(0.0)
    }

    /// Linear interpolation: `self + (other - self) * t`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self(self.0.lerp(&other.0, t))
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// Multiplies every component by `s`.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self(&self.0 * s)
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Squared Euclidean length.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    #[must_use]
    pub fn try_normalize(&self) -> Option<Self> {
        self.0.try_normalize(TOLERANCE).map(Self)
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance between two points.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        (&self.0 - &other.0).norm_squared()
    }

    /// Squared distance from this point to the infinite line through `a` with
    /// unit direction `dir`.
    #[must_use]
    pub fn line_distance_squared(&self, a: &Self, dir: &Self) -> f64 {
        let v = self - a;
        let along = v.dot(dir);
        (&v - &(dir * along)).norm_squared()
    }
}

impl Add for &PointN {
    type Output = PointN;

    fn add(self, rhs: &PointN) -> PointN {
        PointN(&self.0 + &rhs.0)
    }
}

impl Sub for &PointN {
    type Output = PointN;

    fn sub(self, rhs: &PointN) -> PointN {
        PointN(&self.0 - &rhs.0)
    }
}

impl Add for PointN {
    type Output = PointN;

    fn add(self, rhs: PointN) -> PointN {
        PointN(self.0 + rhs.0)
    }
}

impl Sub for PointN {
    type Output = PointN;

    fn sub(self, rhs: PointN) -> PointN {
        PointN(self.0 - rhs.0)
    }
}

impl Mul<f64> for &PointN {
    type Output = PointN;

    fn mul(self, rhs: f64) -> PointN {
        self.scale(rhs)
    }
}

impl Mul<f64> for PointN {
    type Output = PointN;

    fn mul(self, rhs: f64) -> PointN {
        PointN(self.0 * rhs)
    }
}

impl Neg for &PointN {
    type Output = PointN;

    fn neg(self) -> PointN {
        PointN(-&self.0)
    }
}

impl Neg for PointN {
    type Output = PointN;

    fn neg(self) -> PointN {
        PointN(-self.0)
    }
}

impl From<Vec<f64>> for PointN {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl From<(f64, f64)> for PointN {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn arithmetic() {
        let a = PointN::xy(1.0, 2.0);
        let b = PointN::xy(4.0, 6.0);
        assert_eq!(&a + &b, PointN::xy(5.0, 8.0));
        assert_eq!(&b - &a, PointN::xy(3.0, 4.0));
        assert_eq!(a.scale(2.0), PointN::xy(2.0, 4.0));
        assert_eq!(-&a, PointN::xy(-1.0, -2.0));
        assert_relative_eq!(a.dot(&b), 16.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn lerp_midpoint() {
        let a = PointN::new(vec![0.0, 0.0, 1.0]);
        let b = PointN::new(vec![2.0, 4.0, 3.0]);
        assert_eq!(a.lerp(&b, 0.5), PointN::from_slice(&[1.0, 2.0, 2.0]));
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(PointN::zeros(3).try_normalize().is_none());
        let n = PointN::xy(3.0, 4.0).try_normalize().unwrap();
        assert_relative_eq!(n.x(), 0.6);
        assert_relative_eq!(n.y(), 0.8);
    }

    #[test]
    fn line_distance() {
        let p = PointN::xy(1.0, 2.0);
        let d = p.line_distance_squared(&PointN::xy(0.0, 0.0), &PointN::xy(1.0, 0.0));
        assert_relative_eq!(d, 4.0);
    }
}

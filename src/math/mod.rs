pub mod arc_2d;
pub mod coord;
pub mod intersect_2d;
pub mod point;
pub mod polygon_2d;

pub use coord::Coord;
pub use point::PointN;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2x2 matrix used for small linear solves.
pub type Matrix2 = nalgebra::Matrix2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

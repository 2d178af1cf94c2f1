pub mod curve;

pub use curve::{ArcSegment, Bezier, CurveDomain, ParametricCurve};

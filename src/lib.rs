//! Curve fitting and planar face extraction.
//!
//! Two subsystems share the geometric primitives in [`math`] and [`geometry`]:
//!
//! - [`fitting::CurveFitter`] turns an ordered stream of N-dimensional samples
//!   into a minimal piecewise cubic Bezier path within an error bound.
//! - [`operations::arrangement::CreateFaces`] turns a bag of possibly
//!   overlapping, possibly disconnected segments into closed faces
//!   ([`topology::CutLoop`]) with signed area and winding.
//!
//! [`tessellation::FlattenCurve`] bridges the two by flattening curves into
//! parameter-tagged segments.

pub mod error;
pub mod fitting;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{CurveCutError, Result};

use thiserror::Error;

/// Top-level error type for the curvecut kernel.
#[derive(Debug, Error)]
pub enum CurveCutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Arrangement(#[from] ArrangementError),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("a bezier curve needs 1 to 4 control points, got {0}")]
    ControlPointCount(usize),

    #[error("control points mix dimensions {expected} and {found}")]
    MixedDimensions { expected: usize, found: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while feeding samples to a curve fitter.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("point has {found} components but the fitter expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid fit parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to curve flattening.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid flattening parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to building a planar arrangement.
///
/// `InvariantViolation` means the graph construction itself is broken; it is
/// never caused by caller input.
#[derive(Debug, Error)]
pub enum ArrangementError {
    #[error("arrangement invariant violated: {0}")]
    InvariantViolation(String),

    #[error("a cut loop needs at least one half-edge")]
    EmptyLoop,

    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("coordinate ({x}, {y}) exceeds the exact predicate range")]
    CoordinateOutOfRange { x: i64, y: i64 },
}

/// Convenience type alias for results using [`CurveCutError`].
pub type Result<T> = std::result::Result<T, CurveCutError>;

//! Piecewise cubic Bezier fitting of sampled N-dimensional points.
//!
//! Each index range is fitted with one cubic by least squares on
//! chord-length parameters, refined with Newton-Raphson reparameterization
//! and split at the worst sample until every piece stays within
//! `max_error`. Splits get a shared tangent when the samples turn smoothly
//! and independent tangents at corners.

mod cubic;
mod tangent;

use std::f64::consts::FRAC_PI_3;

use tracing::{debug, trace};

use crate::error::{FitError, Result};
use crate::geometry::Bezier;
use crate::math::PointN;

use cubic::{fit_single, reduce_to_line};
use tangent::{Samples, TangentEstimator};

/// Parameters for [`CurveFitter`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitParams {
    /// Number of components of every sample.
    pub vector_size: usize,
    /// Fit a closed loop back to the first sample.
    pub closed_loop: bool,
    /// Largest allowed distance between a sample and the fitted curve.
    pub max_error: f64,
    /// Largest turn, in radians, still treated as a smooth join.
    pub corner_angle: f64,
    /// Samples on each side used to estimate a tangent.
    pub tangent_neighborhood: usize,
    /// Split depth at which the best fit found is accepted as is.
    pub max_depth: usize,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            vector_size: 2,
            closed_loop: false,
            max_error: 1.0,
            corner_angle: FRAC_PI_3,
            tangent_neighborhood: 2,
            max_depth: 32,
        }
    }
}

impl FitParams {
    fn validate(&self) -> std::result::Result<(), FitError> {
        if self.vector_size == 0 {
            return Err(FitError::InvalidParameters(
                "vector_size must be at least 1".to_owned(),
            ));
        }
        if !(self.max_error.is_finite() && self.max_error >= 0.0) {
            return Err(FitError::InvalidParameters(format!(
                "max_error must be finite and non-negative, got {}",
                self.max_error
            )));
        }
        if !(0.0..=std::f64::consts::PI).contains(&self.corner_angle) {
            return Err(FitError::InvalidParameters(format!(
                "corner_angle must lie in [0, pi], got {}",
                self.corner_angle
            )));
        }
        if self.tangent_neighborhood == 0 {
            return Err(FitError::InvalidParameters(
                "tangent_neighborhood must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Squared deviation accepted without further work.
    pub(crate) fn tolerance(&self) -> f64 {
        self.max_error * self.max_error
    }

    /// Squared deviation below which reparameterization is worth trying
    /// before splitting.
    ///
    /// This is `max(tolerance², 4·tolerance)` rather than `tolerance²` alone,
    /// so that for `max_error` below 1 a piece up to twice `max_error` off is
    /// still refined instead of split.
    pub(crate) fn iteration_error(&self) -> f64 {
        let tolerance = self.tolerance();
        (tolerance * tolerance).max(4.0 * tolerance)
    }
}

/// One fitted piece and the sample range it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct FitRecord {
    /// A cubic, or a two-point line when the cubic was straight.
    pub curve: Bezier,
    /// Largest squared deviation between the curve and its samples.
    pub error: f64,
    /// Index of the first sample.
    pub first: usize,
    /// Index of the last sample. In a closed loop the final record ends at
    /// the sample count, which stands for the first sample again.
    pub last: usize,
    /// Unit tangent leaving `first`.
    pub left_tangent: PointN,
    /// Unit tangent leaving `last` backwards along the curve.
    pub right_tangent: PointN,
}

/// Pending range on the fitting worklist.
struct Span {
    first: usize,
    last: usize,
    left: PointN,
    right: PointN,
    depth: usize,
}

/// Incrementally fits piecewise cubic Beziers to a growing point sequence.
///
/// Points are fitted lazily: [`add_point`](Self::add_point) only marks the
/// fit stale and the next [`refit`](Self::refit), [`curves`](Self::curves) or
/// [`records`](Self::records) call brings it up to date. In open mode only
/// the last record is refitted when points arrive; earlier records are
/// frozen. Closed loops are refitted from scratch.
#[derive(Debug, Clone)]
pub struct CurveFitter {
    params: FitParams,
    tangents: TangentEstimator,
    points: Vec<PointN>,
    records: Vec<FitRecord>,
    curves: Vec<Bezier>,
    dirty: bool,
}

impl CurveFitter {
    /// Creates an empty fitter.
    ///
    /// # Errors
    ///
    /// Returns `FitError::InvalidParameters` for a zero `vector_size` or
    /// `tangent_neighborhood`, a negative or non-finite `max_error`, or a
    /// `corner_angle` outside `[0, pi]`.
    pub fn new(params: FitParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            tangents: TangentEstimator::new(params.tangent_neighborhood),
            params,
            points: Vec::new(),
            records: Vec::new(),
            curves: Vec::new(),
            dirty: false,
        })
    }

    #[must_use]
    pub fn params(&self) -> &FitParams {
        &self.params
    }

    /// Appends a sample. A repeat of the previous sample is ignored.
    ///
    /// # Errors
    ///
    /// Returns `FitError::DimensionMismatch` if the point does not have
    /// `vector_size` components.
    pub fn add_point(&mut self, point: PointN) -> Result<()> {
        if point.dim() != self.params.vector_size {
            return Err(FitError::DimensionMismatch {
                expected: self.params.vector_size,
                found: point.dim(),
            }
            .into());
        }
        if self.points.last() == Some(&point) {
            trace!("ignoring repeated sample");
            return Ok(());
        }
        self.points.push(point);
        self.dirty = true;
        Ok(())
    }

    /// The samples added so far.
    #[must_use]
    pub fn points(&self) -> &[PointN] {
        &self.points
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether samples were added since the last fit.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drops every sample and fitted curve.
    pub fn clear(&mut self) {
        self.points.clear();
        self.records.clear();
        self.curves.clear();
        self.dirty = false;
    }

    /// The fitted curves, refitting first if samples were added.
    ///
    /// Calling this repeatedly without adding samples returns the same
    /// curves without recomputing them.
    pub fn curves(&mut self) -> &[Bezier] {
        self.refit();
        &self.curves
    }

    /// The fit records, refitting first if samples were added.
    pub fn records(&mut self) -> &[FitRecord] {
        self.refit();
        &self.records
    }

    /// Brings the fit up to date with the samples. Does nothing when the fit
    /// is current. Fewer than two samples produce no curves.
    pub fn refit(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let n = self.points.len();
        if n < 2 {
            self.records.clear();
            self.curves.clear();
            return;
        }

        let closed = self.params.closed_loop && n >= 3;
        let samples = Samples::new(&self.points, closed);
        if closed {
            let join = self.tangents.join(&samples, 0, self.params.corner_angle);
            let span = Span {
                first: 0,
                last: n,
                left: join.start,
                right: join.end,
                depth: 0,
            };
            self.records = self.fit_span(&samples, span);
        } else {
            // A record starting at a join keeps the join tangent; the start of
            // the stroke is re-estimated as its window fills up.
            let (first, left) = match self.records.pop() {
                Some(record) if record.first > 0 => (record.first, record.left_tangent),
                _ => (
                    0,
                    self.tangents
                        .forward(&samples, 0)
                        .unwrap_or_else(|| chord_direction(&samples, 0, n - 1)),
                ),
            };
            let right = self
                .tangents
                .backward(&samples, n - 1)
                .unwrap_or_else(|| chord_direction(&samples, n - 1, first));
            let span = Span {
                first,
                last: n - 1,
                left,
                right,
                depth: 0,
            };
            let fitted = self.fit_span(&samples, span);
            self.records.extend(fitted);
        }

        self.curves = self.records.iter().map(|r| r.curve.clone()).collect();
        debug!(
            samples = n,
            closed,
            curves = self.curves.len(),
            "refitted curves"
        );
    }

    /// Fits `span`, splitting until every piece is within tolerance or the
    /// depth cap is hit. Records come out in sample order.
    fn fit_span(&self, samples: &Samples<'_>, span: Span) -> Vec<FitRecord> {
        let mut records = Vec::new();
        let mut stack = vec![span];
        while let Some(span) = stack.pop() {
            let fit = fit_single(
                samples,
                span.first,
                span.last,
                &span.left,
                &span.right,
                &self.params,
            );

            let accept = fit.error < self.params.tolerance()
                || span.last - span.first < 2
                || span.depth >= self.params.max_depth;
            if accept {
                if span.depth >= self.params.max_depth && fit.error >= self.params.tolerance() {
                    debug!(
                        first = span.first,
                        last = span.last,
                        error = fit.error,
                        "depth cap reached; keeping best fit"
                    );
                }
                records.push(FitRecord {
                    curve: reduce_to_line(&fit.curve).unwrap_or(fit.curve),
                    error: fit.error,
                    first: span.first,
                    last: span.last,
                    left_tangent: span.left,
                    right_tangent: span.right,
                });
                continue;
            }

            let join = self
                .tangents
                .join(samples, fit.split, self.params.corner_angle);
            trace!(
                first = span.first,
                split = fit.split,
                last = span.last,
                cusp = join.cusp,
                error = fit.error,
                "splitting range"
            );
            stack.push(Span {
                first: fit.split,
                last: span.last,
                left: join.start,
                right: span.right,
                depth: span.depth + 1,
            });
            stack.push(Span {
                first: span.first,
                last: fit.split,
                left: span.left,
                right: join.end,
                depth: span.depth + 1,
            });
        }
        records
    }
}

/// Unit direction from sample `from` towards sample `to`, or zero when they
/// coincide.
fn chord_direction(samples: &Samples<'_>, from: usize, to: usize) -> PointN {
    let a = samples.at(from);
    (samples.at(to) - a)
        .try_normalize()
        .unwrap_or_else(|| PointN::zeros(a.dim()))
}

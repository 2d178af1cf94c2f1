use crate::geometry::Bezier;
use crate::math::{Matrix2, PointN, Vector2, TOLERANCE};

use super::tangent::Samples;
use super::FitParams;

/// Newton-Raphson passes tried before giving up on a range.
const MAX_REPARAM_ITERATIONS: usize = 4;

/// Tangent scales below this fraction of the chord fall back to the
/// heuristic.
const MIN_ALPHA_RATIO: f64 = 1e-6;

/// Relative distance under which interior control points count as lying on
/// the chord.
const LINE_TOLERANCE: f64 = 1e-9;

/// Best cubic found for one index range.
#[derive(Debug, Clone)]
pub(super) struct SingleFit {
    pub curve: Bezier,
    /// Maximum squared deviation from the samples.
    pub error: f64,
    /// Sample index with the largest deviation, strictly inside the range
    /// when the range has interior samples.
    pub split: usize,
}

/// Fits one cubic to the samples `first..=last` with the given end tangents.
pub(super) fn fit_single(
    samples: &Samples<'_>,
    first: usize,
    last: usize,
    left: &PointN,
    right: &PointN,
    params: &FitParams,
) -> SingleFit {
    let points: Vec<&PointN> = (first..=last).map(|i| samples.at(i)).collect();
    if points.len() <= 2 {
        return SingleFit {
            curve: heuristic(points[0], points[points.len() - 1], left, right),
            error: 0.0,
            split: first,
        };
    }

    let mut u = chord_parameters(&points);
    let mut curve = generate(&points, &u, left, right);
    let (error, split) = max_deviation(&curve, &points, &u);
    let mut best = SingleFit {
        curve: curve.clone(),
        error,
        split,
    };

    if error >= params.tolerance() && error < params.iteration_error() {
        for _ in 0..MAX_REPARAM_ITERATIONS {
            let next = reparameterize(&curve, &points, &u);
            if !next.windows(2).all(|w| w[0] < w[1]) {
                break;
            }
            u = next;
            curve = generate(&points, &u, left, right);
            let (error, split) = max_deviation(&curve, &points, &u);
            if error < best.error {
                best = SingleFit {
                    curve: curve.clone(),
                    error,
                    split,
                };
            }
            if best.error < params.tolerance() {
                break;
            }
        }
    }

    best.split += first;
    best
}

/// Replaces a cubic whose interior control points sit on its chord, between
/// the endpoints, by the equivalent two-point line.
pub(super) fn reduce_to_line(curve: &Bezier) -> Option<Bezier> {
    let [p0, p1, p2, p3] = curve.points() else {
        return None;
    };
    let chord = p3 - p0;
    let length = chord.norm();
    let dir = chord.try_normalize()?;
    let tolerance = (LINE_TOLERANCE * length).powi(2);
    for p in [p1, p2] {
        if p.line_distance_squared(p0, &dir) > tolerance {
            return None;
        }
        let along = (p - p0).dot(&dir);
        if along < -LINE_TOLERANCE * length || along > length * (1.0 + LINE_TOLERANCE) {
            return None;
        }
    }
    Some(Bezier::line(p0.clone(), p3.clone()))
}

/// Places the inner control points a third of the chord along the tangents.
fn heuristic(p0: &PointN, p3: &PointN, left: &PointN, right: &PointN) -> Bezier {
    let dist = p0.distance(p3) / 3.0;
    Bezier::cubic(p0.clone(), p0 + &(left * dist), p3 + &(right * dist), p3.clone())
}

/// Cumulative chord length normalized to `[0, 1]`; uniform when every sample
/// coincides.
#[allow(clippy::cast_precision_loss)]
fn chord_parameters(points: &[&PointN]) -> Vec<f64> {
    let mut u = Vec::with_capacity(points.len());
    let mut total = 0.0;
    u.push(0.0);
    for w in points.windows(2) {
        total += w[0].distance(w[1]);
        u.push(total);
    }
    if total <= TOLERANCE {
        let last = (points.len() - 1) as f64;
        return (0..points.len()).map(|i| i as f64 / last).collect();
    }
    u.iter().map(|d| d / total).collect()
}

fn bernstein(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t]
}

/// Least-squares cubic through `points` at parameters `u`, with the inner
/// control points constrained to the end tangents.
fn generate(points: &[&PointN], u: &[f64], left: &PointN, right: &PointN) -> Bezier {
    let p0 = points[0];
    let p3 = points[points.len() - 1];

    let (mut c00, mut c01, mut c11) = (0.0, 0.0, 0.0);
    let (mut x0, mut x1) = (0.0, 0.0);
    for (&p, &t) in points.iter().zip(u) {
        let [b0, b1, b2, b3] = bernstein(t);
        let a1 = left * b1;
        let a2 = right * b2;
        c00 += a1.dot(&a1);
        c01 += a1.dot(&a2);
        c11 += a2.dot(&a2);
        let residual = p - &(p0 * (b0 + b1) + p3 * (b2 + b3));
        x0 += a1.dot(&residual);
        x1 += a2.dot(&residual);
    }

    let det = c00 * c11 - c01 * c01;
    if det.abs() <= f64::EPSILON * c00 * c11 {
        return heuristic(p0, p3, left, right);
    }
    let Some(alpha) = Matrix2::new(c00, c01, c01, c11)
        .lu()
        .solve(&Vector2::new(x0, x1))
    else {
        return heuristic(p0, p3, left, right);
    };

    let min_alpha = MIN_ALPHA_RATIO * p0.distance(p3);
    if !(alpha.x.is_finite() && alpha.y.is_finite()) || alpha.x < min_alpha || alpha.y < min_alpha {
        return heuristic(p0, p3, left, right);
    }
    Bezier::cubic(
        p0.clone(),
        p0 + &(left * alpha.x),
        p3 + &(right * alpha.y),
        p3.clone(),
    )
}

/// Largest squared distance between interior samples and the curve at their
/// parameters, with the local index where it occurs.
fn max_deviation(curve: &Bezier, points: &[&PointN], u: &[f64]) -> (f64, usize) {
    let n = points.len();
    let mut worst = (0.0, n / 2);
    for i in 1..n - 1 {
        let d = curve.evaluate(u[i]).distance_squared(points[i]);
        if d > worst.0 {
            worst = (d, i);
        }
    }
    worst
}

/// One Newton-Raphson step per interior sample towards the closest point on
/// the curve. Endpoints stay pinned at 0 and 1.
fn reparameterize(curve: &Bezier, points: &[&PointN], u: &[f64]) -> Vec<f64> {
    let d1 = curve.derivative();
    let d2 = d1.derivative();
    let last = u.len() - 1;
    u.iter()
        .zip(points)
        .enumerate()
        .map(|(i, (&t, &p))| {
            if i == 0 || i == last {
                return t;
            }
            let diff = &curve.evaluate(t) - p;
            let q1 = d1.evaluate(t);
            let q2 = d2.evaluate(t);
            let denom = q1.dot(&q1) + diff.dot(&q2);
            if denom.abs() < TOLERANCE {
                t
            } else {
                t - diff.dot(&q1) / denom
            }
        })
        .collect()
}

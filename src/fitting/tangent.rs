use crate::math::PointN;

/// Read-only view of the samples being fitted.
///
/// In closed mode indices wrap around, so index `len()` is the first sample
/// again.
pub(super) struct Samples<'a> {
    points: &'a [PointN],
    closed: bool,
}

impl<'a> Samples<'a> {
    pub(super) fn new(points: &'a [PointN], closed: bool) -> Self {
        Self { points, closed }
    }

    pub(super) fn len(&self) -> usize {
        self.points.len()
    }

    pub(super) fn at(&self, i: usize) -> &'a PointN {
        &self.points[i % self.points.len()]
    }

    fn ahead(&self, i: usize, offset: usize) -> Option<&'a PointN> {
        if self.closed {
            Some(self.at(i + offset))
        } else {
            self.points.get(i + offset)
        }
    }

    fn behind(&self, i: usize, offset: usize) -> Option<&'a PointN> {
        let n = self.points.len();
        if self.closed {
            Some(self.at(i % n + n - offset % n))
        } else {
            i.checked_sub(offset).and_then(|j| self.points.get(j))
        }
    }

    /// Largest offset that does not revisit a sample.
    fn reach(&self, neighborhood: usize) -> usize {
        if self.closed {
            neighborhood.min(self.points.len() - 1)
        } else {
            neighborhood
        }
    }
}

/// Tangents at a join between two fitted pieces.
#[derive(Debug, Clone)]
pub(super) struct Join {
    /// Right tangent of the piece ending at the join, pointing backwards.
    pub end: PointN,
    /// Left tangent of the piece starting at the join.
    pub start: PointN,
    pub cusp: bool,
}

/// Estimates unit tangents as the least-squares slope through a window of
/// neighboring samples.
///
/// The slope weights only depend on the window length, so they are computed
/// once for every length up to `2 * neighborhood + 1`.
#[derive(Debug, Clone)]
pub(super) struct TangentEstimator {
    neighborhood: usize,
    weights: Vec<Vec<f64>>,
}

impl TangentEstimator {
    pub(super) fn new(neighborhood: usize) -> Self {
        let weights = (0..=2 * neighborhood + 1).map(slope_weights).collect();
        Self {
            neighborhood,
            weights,
        }
    }

    /// Tangent at `i` pointing towards later samples.
    pub(super) fn forward(&self, samples: &Samples<'_>, i: usize) -> Option<PointN> {
        let window: Vec<&PointN> = (0..=samples.reach(self.neighborhood))
            .map_while(|j| samples.ahead(i, j))
            .collect();
        self.slope(&window)
    }

    /// Tangent at `i` pointing towards earlier samples.
    pub(super) fn backward(&self, samples: &Samples<'_>, i: usize) -> Option<PointN> {
        let window: Vec<&PointN> = (0..=samples.reach(self.neighborhood))
            .map_while(|j| samples.behind(i, j))
            .collect();
        self.slope(&window)
    }

    /// Tangent at `i` over `2 * neighborhood + 1` samples centered on it,
    /// pointing towards later samples. `None` if the window does not fit.
    pub(super) fn centered(&self, samples: &Samples<'_>, i: usize) -> Option<PointN> {
        let k = self.neighborhood;
        if samples.closed && 2 * k + 1 > samples.len() {
            return None;
        }
        let window = (1..=k)
            .rev()
            .map(|j| samples.behind(i, j))
            .chain((0..=k).map(|j| samples.ahead(i, j)))
            .collect::<Option<Vec<_>>>()?;
        self.slope(&window)
    }

    /// Tangents on both sides of sample `i`.
    ///
    /// When the forward direction and the reversed backward direction are at
    /// most `corner_angle` apart the join is smooth and both sides share one
    /// tangent; otherwise it is a cusp and each side keeps its own.
    pub(super) fn join(&self, samples: &Samples<'_>, i: usize, corner_angle: f64) -> Join {
        match (self.forward(samples, i), self.backward(samples, i)) {
            (Some(f), Some(b)) => {
                let angle = (-f.dot(&b)).clamp(-1.0, 1.0).acos();
                if angle <= corner_angle {
                    let c = self
                        .centered(samples, i)
                        .or_else(|| (&f - &b).try_normalize())
                        .unwrap_or(f);
                    Join {
                        end: -&c,
                        start: c,
                        cusp: false,
                    }
                } else {
                    Join {
                        end: b,
                        start: f,
                        cusp: true,
                    }
                }
            }
            (Some(f), None) => Join {
                end: -&f,
                start: f,
                cusp: false,
            },
            (None, Some(b)) => Join {
                start: -&b,
                end: b,
                cusp: false,
            },
            (None, None) => {
                let zero = PointN::zeros(samples.at(i).dim());
                Join {
                    end: zero.clone(),
                    start: zero,
                    cusp: true,
                }
            }
        }
    }

    fn slope(&self, window: &[&PointN]) -> Option<PointN> {
        let weights = self.weights.get(window.len()).filter(|w| !w.is_empty())?;
        let dim = window.first()?.dim();
        window
            .iter()
            .zip(weights)
            .fold(PointN::zeros(dim), |acc, (p, &w)| acc + *p * w)
            .try_normalize()
    }
}

/// Least-squares slope weights `w_j = (j - mean) / Σ (j - mean)²` for
/// `count` equally spaced samples.
#[allow(clippy::cast_precision_loss)]
fn slope_weights(count: usize) -> Vec<f64> {
    if count < 2 {
        return Vec::new();
    }
    let mean = (count - 1) as f64 / 2.0;
    let denom: f64 = (0..count).map(|j| (j as f64 - mean).powi(2)).sum();
    (0..count).map(|j| (j as f64 - mean) / denom).collect()
}

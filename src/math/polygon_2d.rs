use super::coord::{cross, Coord};
use super::Point2;

/// Computes the signed area of a floating-point polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Twice the signed area of an integer polygon, exact.
///
/// Cross products are taken relative to the first vertex so the sum stays small
/// for polygons far from the origin.
#[must_use]
pub fn twice_signed_area(points: &[Coord]) -> i128 {
    let Some(&origin) = points.first() else {
        return 0;
    };
    points
        .windows(2)
        .map(|w| cross(w[0].delta_from(origin), w[1].delta_from(origin)))
        .sum()
}

/// Crossing-number containment test of `(px, py)` against closed edges.
///
/// A horizontal ray is cast towards `+x`; an edge toggles the result when it
/// straddles the ray's height and the point lies on the side of the edge the
/// ray leaves through (left of upward edges, right of downward ones). Points
/// exactly on an edge may land on either side.
#[must_use]
pub fn crossing_contains<I>(edges: I, px: f64, py: f64) -> bool
where
    I: IntoIterator<Item = (Coord, Coord)>,
{
    let mut inside = false;
    for (a, b) in edges {
        let (ax, ay) = to_f64(a);
        let (bx, by) = to_f64(b);
        if (ay <= py) == (by <= py) {
            continue;
        }
        let side = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
        let upward = by > ay;
        if upward == (side > 0.0) {
            inside = !inside;
        }
    }
    inside
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(c: Coord) -> (f64, f64) {
    (c.x as f64, c.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Coord> {
        vec![
            Coord::new(0, 0),
            Coord::new(2, 0),
            Coord::new(2, 2),
            Coord::new(0, 2),
        ]
    }

    fn closed_edges(points: &[Coord]) -> Vec<(Coord, Coord)> {
        (0..points.len())
            .map(|i| (points[i], points[(i + 1) % points.len()]))
            .collect()
    }

    #[test]
    fn signed_area_ccw_and_cw_square() {
        let ccw = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_relative_eq!(signed_area_2d(&ccw), 1.0);
        let cw: Vec<Point2> = ccw.into_iter().rev().collect();
        assert_relative_eq!(signed_area_2d(&cw), -1.0);
        assert_relative_eq!(signed_area_2d(&[]), 0.0);
    }

    #[test]
    fn twice_area_exact() {
        let sq = square();
        assert_eq!(twice_signed_area(&sq), 8);
        let rev: Vec<Coord> = sq.into_iter().rev().collect();
        assert_eq!(twice_signed_area(&rev), -8);
    }

    #[test]
    fn twice_area_far_from_origin() {
        let offset = 1_i64 << 40;
        let sq: Vec<Coord> = square()
            .into_iter()
            .map(|c| Coord::new(c.x + offset, c.y - offset))
            .collect();
        assert_eq!(twice_signed_area(&sq), 8);
    }

    #[test]
    fn containment() {
        let edges = closed_edges(&square());
        assert!(crossing_contains(edges.clone(), 1.0, 1.0));
        assert!(!crossing_contains(edges.clone(), 3.0, 1.0));
        assert!(!crossing_contains(edges.clone(), -1.0, 1.0));
        assert!(!crossing_contains(edges, 1.0, 2.5));
    }

    #[test]
    fn containment_ignores_winding() {
        let rev: Vec<Coord> = square().into_iter().rev().collect();
        assert!(crossing_contains(closed_edges(&rev), 0.5, 1.5));
    }
}

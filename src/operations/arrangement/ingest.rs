use std::collections::HashSet;

use crate::error::ArrangementError;
use crate::math::intersect_2d::classify_segments;
use crate::math::Coord;
use crate::topology::Segment;

/// Rejects input whose endpoints would overflow the exact predicates.
pub(super) fn check_range<D>(segments: &[Segment<D>]) -> Result<(), ArrangementError> {
    match segments
        .iter()
        .flat_map(|s| [s.start, s.end])
        .find(|c| !c.in_range())
    {
        Some(c) => Err(ArrangementError::CoordinateOutOfRange { x: c.x, y: c.y }),
        None => Ok(()),
    }
}

/// Drops zero-length segments and repeats of an already seen unordered
/// endpoint pair, keeping the first occurrence.
pub(super) fn normalize<D>(segments: &[Segment<D>]) -> Vec<&Segment<D>> {
    let mut seen: HashSet<(Coord, Coord)> = HashSet::with_capacity(segments.len());
    segments
        .iter()
        .filter(|s| !s.is_degenerate())
        .filter(|s| seen.insert((s.start.min(s.end), s.start.max(s.end))))
        .collect()
}

/// Removes both members of every colliding pair.
///
/// Candidates are found with a sweep over the x extents; each overlapping
/// pair of bounding boxes is classified exactly. A segment colliding with
/// several others causes all of them to be removed.
pub(super) fn remove_collisions<'a, D>(
    segments: Vec<&'a Segment<D>>,
) -> (Vec<&'a Segment<D>>, usize) {
    let boxes: Vec<(Coord, Coord)> = segments
        .iter()
        .map(|s| {
            (
                Coord::new(s.start.x.min(s.end.x), s.start.y.min(s.end.y)),
                Coord::new(s.start.x.max(s.end.x), s.start.y.max(s.end.y)),
            )
        })
        .collect();

    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by_key(|&i| boxes[i].0.x);

    let mut colliding = vec![false; segments.len()];
    for (k, &i) in order.iter().enumerate() {
        let (min_i, max_i) = boxes[i];
        for &j in &order[k + 1..] {
            let (min_j, max_j) = boxes[j];
            if min_j.x > max_i.x {
                break;
            }
            if min_j.y > max_i.y || max_j.y < min_i.y {
                continue;
            }
            let (a, b) = (segments[i], segments[j]);
            if classify_segments(a.start, a.end, b.start, b.end).collides() {
                colliding[i] = true;
                colliding[j] = true;
            }
        }
    }

    let removed = colliding.iter().filter(|&&c| c).count();
    let kept = segments
        .into_iter()
        .zip(colliding)
        .filter_map(|(s, c)| (!c).then_some(s))
        .collect();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CurveDomain;

    fn seg(a: (i64, i64), b: (i64, i64), tag: u8) -> Segment<u8> {
        Segment::new(Coord::new(a.0, a.1), Coord::new(b.0, b.1), CurveDomain::unit(), tag)
    }

    #[test]
    fn normalize_drops_degenerate_and_reversed_duplicates() {
        let input = vec![
            seg((0, 0), (1, 0), 0),
            seg((1, 0), (0, 0), 1),
            seg((2, 2), (2, 2), 2),
            seg((1, 0), (1, 1), 3),
        ];
        let kept: Vec<u8> = normalize(&input).iter().map(|s| s.data).collect();
        assert_eq!(kept, vec![0, 3]);
    }

    #[test]
    fn out_of_range_endpoint_is_rejected() {
        let inside = vec![seg((-5, 0), (Coord::LIMIT, Coord::LIMIT), 0)];
        assert!(check_range(&inside).is_ok());
        let outside = vec![
            seg((0, 0), (1, 0), 0),
            seg((1, 0), (i64::MAX, -3), 1),
        ];
        assert!(matches!(
            check_range(&outside),
            Err(ArrangementError::CoordinateOutOfRange { x: i64::MAX, y: -3 })
        ));
    }

    #[test]
    fn crossing_pair_is_removed() {
        let input = vec![
            seg((0, 0), (4, 4), 0),
            seg((0, 4), (4, 0), 1),
            seg((10, 0), (11, 0), 2),
        ];
        let (kept, removed) = remove_collisions(normalize(&input));
        assert_eq!(removed, 2);
        assert_eq!(kept.iter().map(|s| s.data).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn touching_pairs_survive() {
        let input = vec![
            seg((0, 0), (4, 0), 0),
            seg((4, 0), (4, 4), 1),
            seg((2, 0), (2, -3), 2),
        ];
        let (kept, removed) = remove_collisions(normalize(&input));
        assert_eq!(removed, 0);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn overlap_removes_every_partner() {
        let input = vec![
            seg((0, 0), (10, 0), 0),
            seg((5, 0), (15, 0), 1),
            seg((3, -1), (3, 1), 2),
        ];
        let (kept, removed) = remove_collisions(normalize(&input));
        assert_eq!(removed, 3);
        assert!(kept.is_empty());
    }
}

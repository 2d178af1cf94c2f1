use std::cmp::Ordering;

use crate::error::ArrangementError;
use crate::math::coord::cross;
use crate::topology::{ArrangementStore, CutSegHalf, SegmentId, VertexId};

/// Creates the forward and backward half-edge of every segment, links them
/// as peers and sorts each vertex's outgoing halves counter-clockwise.
pub(super) fn build_half_edges<D>(store: &mut ArrangementStore<D>) -> Result<(), ArrangementError> {
    let segments: Vec<(SegmentId, VertexId, VertexId)> = store
        .segments()
        .map(|(id, s)| (id, s.start, s.end))
        .collect();

    for (id, start, end) in segments {
        let forward = store.add_half(CutSegHalf::new(id, start, end, true));
        let backward = store.add_half(CutSegHalf::new(id, end, start, false));
        store.half_mut(forward)?.set_peer(backward);
        store.half_mut(backward)?.set_peer(forward);
        store.segment_mut(id)?.halves = Some([forward, backward]);
        store.vertex_mut(start)?.halves.push(forward);
        store.vertex_mut(end)?.halves.push(backward);
    }

    let vertices: Vec<VertexId> = store.vertices().map(|(id, _)| id).collect();
    for v in vertices {
        sort_vertex(store, v)?;
    }
    Ok(())
}

/// Sorts the outgoing halves of `v` counter-clockwise, starting from the
/// positive x axis. Equal directions fall back to half-edge id order.
pub(super) fn sort_vertex<D>(
    store: &mut ArrangementStore<D>,
    v: VertexId,
) -> Result<(), ArrangementError> {
    let origin = store.vertex(v)?.coord;
    let mut keyed = store
        .vertex(v)?
        .halves
        .iter()
        .map(|&h| -> Result<_, ArrangementError> {
            let to = store.vertex(store.half(h)?.to)?.coord;
            Ok((h, to.delta_from(origin)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(ha, da), (hb, db)| radial_cmp(*da, *db).then(ha.cmp(hb)));
    store.vertex_mut(v)?.halves = keyed.into_iter().map(|(h, _)| h).collect();
    Ok(())
}

/// Counter-clockwise angular order of two non-zero directions, measured from
/// the positive x axis, computed exactly.
pub(super) fn radial_cmp(a: (i128, i128), b: (i128, i128)) -> Ordering {
    quadrant(a)
        .cmp(&quadrant(b))
        .then_with(|| 0.cmp(&cross(a, b)))
}

/// Half-open quadrant index: `[0°, 90°)` is 0, `[90°, 180°)` is 1 and so on.
fn quadrant((dx, dy): (i128, i128)) -> u8 {
    if dx > 0 && dy >= 0 {
        0
    } else if dx <= 0 && dy > 0 {
        1
    } else if dx < 0 && dy <= 0 {
        2
    } else {
        3
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CurveDomain;
    use crate::math::Coord;

    #[test]
    fn axes_fall_in_successive_quadrants() {
        assert_eq!(quadrant((1, 0)), 0);
        assert_eq!(quadrant((0, 1)), 1);
        assert_eq!(quadrant((-1, 0)), 2);
        assert_eq!(quadrant((0, -1)), 3);
    }

    #[test]
    fn radial_order_is_counter_clockwise() {
        let mut dirs = vec![(0, -1), (-1, -1), (1, 1), (-1, 0), (1, 0), (0, 1), (2, 1), (1, -3)];
        dirs.sort_by(|a, b| radial_cmp(*a, *b));
        assert_eq!(
            dirs,
            vec![(1, 0), (2, 1), (1, 1), (0, 1), (-1, 0), (-1, -1), (0, -1), (1, -3)]
        );
    }

    #[test]
    fn collinear_same_direction_compares_equal() {
        assert_eq!(radial_cmp((1, 2), (2, 4)), Ordering::Equal);
        assert_ne!(radial_cmp((1, 2), (-1, -2)), Ordering::Equal);
    }

    #[test]
    fn star_vertex_halves_are_sorted_and_peered() {
        let mut store: ArrangementStore<()> = ArrangementStore::new();
        let center = Coord::new(0, 0);
        for (x, y) in [(0, -5), (5, 0), (-5, 0), (0, 5)] {
            store.add_segment(Coord::new(x, y), center, CurveDomain::unit(), Some(()));
        }
        build_half_edges(&mut store).unwrap();
        assert_eq!(store.half_count(), 8);

        let v = store.vertex_at(center);
        let targets: Vec<Coord> = store
            .vertex(v)
            .unwrap()
            .halves
            .iter()
            .map(|&h| store.vertex(store.half(h).unwrap().to).unwrap().coord)
            .collect();
        assert_eq!(
            targets,
            vec![Coord::new(5, 0), Coord::new(0, 5), Coord::new(-5, 0), Coord::new(0, -5)]
        );

        for h in store.half_ids() {
            let half = store.half(h).unwrap();
            let peer = store.half(half.peer().unwrap()).unwrap();
            assert_eq!(peer.peer().unwrap(), h);
            assert_eq!((peer.from, peer.to), (half.to, half.from));
            assert_ne!(peer.forward, half.forward);
        }
    }
}

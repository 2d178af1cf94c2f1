use std::collections::VecDeque;

use tracing::trace;

use crate::error::ArrangementError;
use crate::topology::{ArrangementStore, VertexId};

/// Repeatedly strips dangling segments until every remaining vertex has
/// degree ≥ 2, then drops vertices left without segments.
///
/// Returns the number of removed segments.
pub(super) fn prune_filaments<D>(
    store: &mut ArrangementStore<D>,
) -> Result<usize, ArrangementError> {
    let mut queue: VecDeque<VertexId> = store
        .vertices()
        .filter(|(_, v)| v.degree() == 1)
        .map(|(id, _)| id)
        .collect();

    let mut removed = 0;
    while let Some(v) = queue.pop_front() {
        let vertex = store.vertex(v)?;
        if vertex.degree() != 1 {
            continue;
        }
        let Some(seg) = vertex.segments().next() else {
            continue;
        };
        let other = store.segment(seg)?.other_end(v);
        store.remove_segment(seg)?;
        removed += 1;
        trace!(?v, ?other, "pruned dangling segment");
        if store.vertex(other)?.degree() == 1 {
            queue.push_back(other);
        }
    }

    let isolated: Vec<VertexId> = store
        .vertices()
        .filter(|(_, v)| v.degree() == 0)
        .map(|(id, _)| id)
        .collect();
    for v in isolated {
        store.remove_vertex(v)?;
    }
    Ok(removed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CurveDomain;
    use crate::math::Coord;

    fn link(store: &mut ArrangementStore<()>, a: (i64, i64), b: (i64, i64)) {
        let (a, b) = (Coord::new(a.0, a.1), Coord::new(b.0, b.1));
        store.add_segment(a, b, CurveDomain::unit(), Some(()));
    }

    #[test]
    fn open_path_vanishes() {
        let mut store = ArrangementStore::new();
        link(&mut store, (0, 0), (1, 0));
        link(&mut store, (1, 0), (2, 1));
        link(&mut store, (2, 1), (3, 0));
        assert_eq!(prune_filaments(&mut store).unwrap(), 3);
        assert_eq!(store.segment_count(), 0);
        assert_eq!(store.vertex_count(), 0);
    }

    #[test]
    fn triangle_with_tail_keeps_triangle() {
        let mut store = ArrangementStore::new();
        link(&mut store, (0, 0), (4, 0));
        link(&mut store, (4, 0), (0, 4));
        link(&mut store, (0, 4), (0, 0));
        link(&mut store, (4, 0), (8, 0));
        link(&mut store, (8, 0), (9, 3));
        assert_eq!(prune_filaments(&mut store).unwrap(), 2);
        assert_eq!(store.segment_count(), 3);
        assert_eq!(store.vertex_count(), 3);
        assert!(store.vertices().all(|(_, v)| v.degree() >= 2));
    }
}

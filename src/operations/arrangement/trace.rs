use slotmap::SecondaryMap;
use tracing::trace;

use crate::error::ArrangementError;
use crate::topology::{ArrangementStore, CutLoop, HalfId, LoopEdge};

/// Walks every half-edge exactly once, collecting the face cycles.
///
/// From a half-edge arriving at a vertex the walk continues with the
/// outgoing half clockwise next to the arrival's peer. Bounded faces come out
/// counter-clockwise, the unbounded face of each component clockwise.
pub(super) fn trace_loops<D: Clone>(
    store: &ArrangementStore<D>,
) -> Result<Vec<CutLoop<D>>, ArrangementError> {
    let mut pending: SecondaryMap<HalfId, ()> = SecondaryMap::with_capacity(store.half_count());
    for h in store.half_ids() {
        pending.insert(h, ());
    }

    let mut loops = Vec::new();
    for start in store.half_ids() {
        if !pending.contains_key(start) {
            continue;
        }
        let mut edges = Vec::new();
        let mut current = start;
        loop {
            if pending.remove(current).is_none() {
                return Err(ArrangementError::InvariantViolation(
                    "face walk revisited a half-edge before closing".to_owned(),
                ));
            }
            edges.push(loop_edge(store, current)?);

            let half = store.half(current)?;
            let next = store.vertex(half.to)?.clockwise_neighbor(half.peer()?)?;
            if next == start {
                break;
            }
            current = next;
        }
        trace!(edges = edges.len(), "closed face loop");
        loops.push(CutLoop::new(edges)?);
    }
    Ok(loops)
}

fn loop_edge<D: Clone>(
    store: &ArrangementStore<D>,
    id: HalfId,
) -> Result<LoopEdge<D>, ArrangementError> {
    let half = store.half(id)?;
    let segment = store.segment(half.segment)?;
    Ok(LoopEdge {
        half: id,
        start: store.vertex(half.from)?.coord,
        end: store.vertex(half.to)?.coord,
        range: if half.forward {
            segment.range
        } else {
            segment.range.reversed()
        },
        data: segment.data.clone(),
        forward: half.forward,
    })
}

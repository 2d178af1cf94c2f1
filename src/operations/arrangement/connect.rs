use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, warn};

use crate::error::ArrangementError;
use crate::geometry::CurveDomain;
use crate::math::coord::dot;
use crate::math::intersect_2d::{classify_segments, strictly_between};
use crate::math::Coord;
use crate::topology::{ArrangementStore, VertexId};

/// Disjoint-set forest over dense indices.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}

/// Groups vertex coordinates into connected components.
///
/// Each component is sorted, and components are ordered by their smallest
/// coordinate, so the result is independent of insertion order.
pub(super) fn components<D>(
    store: &ArrangementStore<D>,
) -> Result<Vec<Vec<Coord>>, ArrangementError> {
    let index: HashMap<VertexId, usize> = store
        .vertices()
        .enumerate()
        .map(|(i, (id, _))| (id, i))
        .collect();
    let coords: Vec<Coord> = store.vertices().map(|(_, v)| v.coord).collect();

    let mut sets = UnionFind::new(coords.len());
    for (_, segment) in store.segments() {
        let a = index
            .get(&segment.start)
            .ok_or(ArrangementError::EntityNotFound("vertex"))?;
        let b = index
            .get(&segment.end)
            .ok_or(ArrangementError::EntityNotFound("vertex"))?;
        sets.union(*a, *b);
    }

    let mut groups: HashMap<usize, Vec<Coord>> = HashMap::new();
    for (i, &coord) in coords.iter().enumerate() {
        groups.entry(sets.find(i)).or_default().push(coord);
    }
    let mut result: Vec<Vec<Coord>> = groups.into_values().collect();
    for group in &mut result {
        group.sort_unstable();
    }
    result.sort_unstable_by_key(|g| g[0]);
    Ok(result)
}

/// Joins all components into one with synthetic straight connectors.
///
/// Each round connects the component holding the smallest coordinate to the
/// rest of the graph with the shortest connector that neither collides with an
/// existing segment nor passes through a vertex; equal lengths fall back to
/// the lexicographically smallest coordinate pair. Candidates are produced
/// lazily in that order and the search stops at the first clear one. Returns
/// the number of connectors added. If no clear connector exists the remaining
/// components are left disconnected.
pub(super) fn repair_connectivity<D>(
    store: &mut ArrangementStore<D>,
) -> Result<usize, ArrangementError> {
    let mut added = 0;
    loop {
        let groups = components(store)?;
        if groups.len() <= 1 {
            return Ok(added);
        }

        let obstacles: Vec<(Coord, Coord)> = store
            .segments()
            .map(|(_, s)| -> Result<_, ArrangementError> {
                Ok((store.vertex(s.start)?.coord, store.vertex(s.end)?.coord))
            })
            .collect::<Result<_, _>>()?;
        let vertices: Vec<Coord> = store.vertices().map(|(_, v)| v.coord).collect();

        let mut others: Vec<Coord> = groups[1..].iter().flatten().copied().collect();
        others.sort_unstable();
        let mut streams: Vec<NearestFirst<'_>> = groups[0]
            .iter()
            .map(|&a| NearestFirst::new(a, &others))
            .collect();

        let mut candidates = BinaryHeap::new();
        for (i, stream) in streams.iter_mut().enumerate() {
            if let Some((d, b)) = stream.next() {
                candidates.push(Reverse((d, stream.origin, b, i)));
            }
        }

        let mut chosen = None;
        while let Some(Reverse((_, a, b, i))) = candidates.pop() {
            if connector_is_clear(a, b, &obstacles, &vertices) {
                chosen = Some((a, b));
                break;
            }
            if let Some((d, next)) = streams[i].next() {
                candidates.push(Reverse((d, a, next, i)));
            }
        }

        let Some((a, b)) = chosen else {
            warn!(
                components = groups.len(),
                "no collision-free connector found; leaving components disconnected"
            );
            return Ok(added);
        };
        debug!(?a, ?b, remaining = groups.len() - 1, "inserting connector");
        store.add_segment(a, b, CurveDomain::unit(), None);
        added += 1;
    }
}

/// Coordinates of an x-sorted slice in `(distance², coord)` order from
/// `origin`, found by widening a window around it.
struct NearestFirst<'a> {
    origin: Coord,
    sorted: &'a [Coord],
    /// Window is `sorted[left..right]`.
    left: usize,
    right: usize,
    seen: BinaryHeap<Reverse<(i128, Coord)>>,
}

impl<'a> NearestFirst<'a> {
    fn new(origin: Coord, sorted: &'a [Coord]) -> Self {
        let split = sorted.partition_point(|c| c.x < origin.x);
        Self {
            origin,
            sorted,
            left: split,
            right: split,
            seen: BinaryHeap::new(),
        }
    }

    fn gap(&self, c: Coord) -> i128 {
        let dx = i128::from(c.x) - i128::from(self.origin.x);
        dx * dx
    }
}

impl Iterator for NearestFirst<'_> {
    type Item = (i128, Coord);

    fn next(&mut self) -> Option<Self::Item> {
        // Anything outside the window is at least its x gap away.
        loop {
            let below = self
                .left
                .checked_sub(1)
                .map(|i| (self.gap(self.sorted[i]), true));
            let above = self.sorted.get(self.right).map(|&c| (self.gap(c), false));
            let Some((gap, from_below)) = below.into_iter().chain(above).min() else {
                break;
            };
            if self.seen.peek().is_some_and(|Reverse((d, _))| gap > *d) {
                break;
            }
            let c = if from_below {
                self.left -= 1;
                self.sorted[self.left]
            } else {
                self.right += 1;
                self.sorted[self.right - 1]
            };
            let d = c.delta_from(self.origin);
            self.seen.push(Reverse((dot(d, d), c)));
        }
        self.seen.pop().map(|Reverse(item)| item)
    }
}

fn connector_is_clear(
    a: Coord,
    b: Coord,
    obstacles: &[(Coord, Coord)],
    vertices: &[Coord],
) -> bool {
    obstacles
        .iter()
        .all(|&(s, e)| !classify_segments(a, b, s, e).collides())
        && vertices.iter().all(|&v| !strictly_between(v, a, b))
}

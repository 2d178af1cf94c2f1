use crate::error::ArrangementError;
use crate::math::Coord;

use super::edge::{HalfId, SegmentId};

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the arrangement store.
    pub struct VertexId;
}

/// A vertex of the arrangement graph.
///
/// Once the graph is pruned every retained vertex has degree ≥ 2, and once
/// half-edges exist `halves` lists the outgoing ones in counter-clockwise
/// order.
#[derive(Debug, Clone)]
pub struct CutVertex {
    pub coord: Coord,
    /// Segments ending here.
    pub incoming: Vec<SegmentId>,
    /// Segments starting here.
    pub outgoing: Vec<SegmentId>,
    /// Outgoing half-edges, radially sorted.
    pub halves: Vec<HalfId>,
}

impl CutVertex {
    /// Creates an isolated vertex.
    #[must_use]
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            halves: Vec::new(),
        }
    }

    /// Number of segments touching this vertex.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }

    /// Every segment touching this vertex, outgoing first.
    pub fn segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.outgoing.iter().chain(self.incoming.iter()).copied()
    }

    /// Forgets `segment` in both adjacency lists.
    pub fn detach(&mut self, segment: SegmentId) {
        self.incoming.retain(|&s| s != segment);
        self.outgoing.retain(|&s| s != segment);
    }

    /// The outgoing half-edge immediately clockwise of `half` in radial order.
    ///
    /// # Errors
    ///
    /// Returns `ArrangementError::InvariantViolation` if `half` does not
    /// leave this vertex.
    pub fn clockwise_neighbor(&self, half: HalfId) -> Result<HalfId, ArrangementError> {
        let n = self.halves.len();
        let pos = self.halves.iter().position(|&h| h == half).ok_or_else(|| {
            ArrangementError::InvariantViolation(format!(
                "half-edge is not owned by vertex ({}, {})",
                self.coord.x, self.coord.y
            ))
        })?;
        Ok(self.halves[(pos + n - 1) % n])
    }
}

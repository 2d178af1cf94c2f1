use crate::error::ArrangementError;
use crate::geometry::CurveDomain;
use crate::math::Coord;

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an undirected segment in the arrangement store.
    pub struct SegmentId;

    /// Unique identifier for a directed half-edge in the arrangement store.
    pub struct HalfId;
}

/// Caller input to the arrangement builder: a straight polyline piece of
/// some curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<D> {
    pub start: Coord,
    pub end: Coord,
    /// Parameter sub-range of the parent curve.
    pub range: CurveDomain,
    /// Opaque provenance carried through to the extracted loops.
    pub data: D,
}

impl<D> Segment<D> {
    /// Creates a new input segment.
    #[must_use]
    pub fn new(start: Coord, end: Coord, range: CurveDomain, data: D) -> Self {
        Self {
            start,
            end,
            range,
            data,
        }
    }

    /// Whether both endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// An undirected segment in the arrangement graph.
///
/// Connectors synthesized while repairing connectivity carry no caller data.
#[derive(Debug, Clone)]
pub struct CutSegment<D> {
    pub start: VertexId,
    pub end: VertexId,
    pub range: CurveDomain,
    /// `None` for synthetic connectors.
    pub data: Option<D>,
    /// The forward (`start -> end`) and backward half-edges, once created.
    pub halves: Option<[HalfId; 2]>,
}

impl<D> CutSegment<D> {
    /// Whether this segment was inserted to connect two components.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.data.is_none()
    }

    /// The endpoint opposite `v`.
    #[must_use]
    pub fn other_end(&self, v: VertexId) -> VertexId {
        if self.start == v {
            self.end
        } else {
            self.start
        }
    }
}

/// One directed traversal of a [`CutSegment`].
///
/// The two halves of a segment are each other's peer.
#[derive(Debug, Clone)]
pub struct CutSegHalf {
    pub segment: SegmentId,
    pub from: VertexId,
    pub to: VertexId,
    /// `true` when traversing the segment from its start to its end.
    pub forward: bool,
    peer: Option<HalfId>,
}

impl CutSegHalf {
    /// Creates a half-edge whose peer is linked later.
    #[must_use]
    pub fn new(segment: SegmentId, from: VertexId, to: VertexId, forward: bool) -> Self {
        Self {
            segment,
            from,
            to,
            forward,
            peer: None,
        }
    }

    /// Links the opposite half-edge.
    pub fn set_peer(&mut self, peer: HalfId) {
        self.peer = Some(peer);
    }

    /// The opposite half-edge of the same segment.
    ///
    /// # Errors
    ///
    /// Returns `ArrangementError::InvariantViolation` if no peer was linked,
    /// which means the graph was built incorrectly.
    pub fn peer(&self) -> Result<HalfId, ArrangementError> {
        self.peer.ok_or_else(|| {
            ArrangementError::InvariantViolation("half-edge has no peer".to_owned())
        })
    }
}

pub mod edge;
pub mod face;
pub mod vertex;

pub use edge::{CutSegHalf, CutSegment, HalfId, Segment, SegmentId};
pub use face::{CutLoop, LoopEdge};
pub use vertex::{CutVertex, VertexId};

use std::collections::HashMap;

use crate::error::ArrangementError;
use crate::geometry::CurveDomain;
use crate::math::Coord;
use slotmap::SlotMap;

/// Central arena that owns the arrangement graph.
///
/// Entities reference each other via typed IDs (generational indices), so the
/// vertex/segment/half-edge back-references form no ownership cycles.
/// Vertices are keyed by exact coordinate.
#[derive(Debug)]
pub struct ArrangementStore<D> {
    vertices: SlotMap<VertexId, CutVertex>,
    segments: SlotMap<SegmentId, CutSegment<D>>,
    halves: SlotMap<HalfId, CutSegHalf>,
    by_coord: HashMap<Coord, VertexId>,
}

impl<D> Default for ArrangementStore<D> {
    fn default() -> Self {
        Self {
            vertices: SlotMap::with_key(),
            segments: SlotMap::with_key(),
            halves: SlotMap::with_key(),
            by_coord: HashMap::new(),
        }
    }
}

impl<D> ArrangementStore<D> {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Returns the vertex at `coord`, inserting it if needed.
    pub fn vertex_at(&mut self, coord: Coord) -> VertexId {
        if let Some(&id) = self.by_coord.get(&coord) {
            return id;
        }
        let id = self.vertices.insert(CutVertex::new(coord));
        self.by_coord.insert(coord, id);
        id
    }

    /// Returns a reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&CutVertex, ArrangementError> {
        self.vertices
            .get(id)
            .ok_or(ArrangementError::EntityNotFound("vertex"))
    }

    /// Returns a mutable reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut CutVertex, ArrangementError> {
        self.vertices
            .get_mut(id)
            .ok_or(ArrangementError::EntityNotFound("vertex"))
    }

    /// Removes a vertex that no segment touches any more.
    ///
    /// # Errors
    ///
    /// Returns `ArrangementError::InvariantViolation` if the vertex still has
    /// segments, or an error if it is not in the store.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<(), ArrangementError> {
        let vertex = self.vertex(id)?;
        if vertex.degree() > 0 {
            return Err(ArrangementError::InvariantViolation(
                "removing a vertex that still has segments".to_owned(),
            ));
        }
        let coord = vertex.coord;
        self.by_coord.remove(&coord);
        self.vertices.remove(id);
        Ok(())
    }

    /// Iterates all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &CutVertex)> {
        self.vertices.iter()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Segment operations ---

    /// Inserts a segment between two coordinates, creating vertices as
    /// needed and registering it in their adjacency lists.
    pub fn add_segment(
        &mut self,
        start: Coord,
        end: Coord,
        range: CurveDomain,
        data: Option<D>,
    ) -> SegmentId {
        let start = self.vertex_at(start);
        let end = self.vertex_at(end);
        let id = self.segments.insert(CutSegment {
            start,
            end,
            range,
            data,
            halves: None,
        });
        if let Some(v) = self.vertices.get_mut(start) {
            v.outgoing.push(id);
        }
        if let Some(v) = self.vertices.get_mut(end) {
            v.incoming.push(id);
        }
        id
    }

    /// Returns a reference to the segment, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn segment(&self, id: SegmentId) -> Result<&CutSegment<D>, ArrangementError> {
        self.segments
            .get(id)
            .ok_or(ArrangementError::EntityNotFound("segment"))
    }

    /// Returns a mutable reference to the segment, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn segment_mut(&mut self, id: SegmentId) -> Result<&mut CutSegment<D>, ArrangementError> {
        self.segments
            .get_mut(id)
            .ok_or(ArrangementError::EntityNotFound("segment"))
    }

    /// Removes a segment and detaches it from both endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not in the store.
    pub fn remove_segment(&mut self, id: SegmentId) -> Result<CutSegment<D>, ArrangementError> {
        let segment = self
            .segments
            .remove(id)
            .ok_or(ArrangementError::EntityNotFound("segment"))?;
        for v in [segment.start, segment.end] {
            if let Some(vertex) = self.vertices.get_mut(v) {
                vertex.detach(id);
            }
        }
        Ok(segment)
    }

    /// Iterates all segments in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &CutSegment<D>)> {
        self.segments.iter()
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    // --- Half-edge operations ---

    /// Inserts a half-edge and returns its ID.
    pub fn add_half(&mut self, half: CutSegHalf) -> HalfId {
        self.halves.insert(half)
    }

    /// Returns a reference to the half-edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn half(&self, id: HalfId) -> Result<&CutSegHalf, ArrangementError> {
        self.halves
            .get(id)
            .ok_or(ArrangementError::EntityNotFound("half-edge"))
    }

    /// Returns a mutable reference to the half-edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn half_mut(&mut self, id: HalfId) -> Result<&mut CutSegHalf, ArrangementError> {
        self.halves
            .get_mut(id)
            .ok_or(ArrangementError::EntityNotFound("half-edge"))
    }

    /// Iterates all half-edge IDs in insertion order.
    pub fn half_ids(&self) -> impl Iterator<Item = HalfId> + '_ {
        self.halves.keys()
    }

    /// Number of half-edges.
    #[must_use]
    pub fn half_count(&self) -> usize {
        self.halves.len()
    }
}

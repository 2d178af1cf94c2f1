//! Planar arrangement of straight segments and extraction of its faces.
//!
//! The pipeline drops degenerate and duplicate input, removes every pair of
//! segments that cross or overlap, joins disconnected components with
//! synthetic connectors, prunes dangling chains, sorts each vertex's
//! half-edges radially and finally walks the faces.

mod connect;
mod ingest;
mod prune;
mod radial;
mod trace;

use tracing::debug;

use crate::error::Result;
use crate::topology::{ArrangementStore, CutLoop, Segment};

/// Options for [`CreateFaces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrangementParams {
    /// Insert synthetic connectors so the face walk sees a single component.
    pub repair_connectivity: bool,
}

impl Default for ArrangementParams {
    fn default() -> Self {
        Self {
            repair_connectivity: true,
        }
    }
}

/// Builds the planar arrangement of a bag of segments and extracts its faces.
pub struct CreateFaces<D> {
    segments: Vec<Segment<D>>,
    params: ArrangementParams,
}

impl<D: Clone> CreateFaces<D> {
    /// Creates a new `CreateFaces` operation.
    #[must_use]
    pub fn new(segments: Vec<Segment<D>>, params: ArrangementParams) -> Self {
        Self { segments, params }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ArrangementError::CoordinateOutOfRange` if an endpoint lies
    /// outside `±Coord::LIMIT`, and `ArrangementError::InvariantViolation` if
    /// the graph ends up inconsistent, which indicates a bug rather than bad
    /// input.
    pub fn execute(&self) -> Result<Arrangement<D>> {
        ingest::check_range(&self.segments)?;
        let (kept, removed_collisions) =
            ingest::remove_collisions(ingest::normalize(&self.segments));

        let mut store = ArrangementStore::new();
        for s in kept {
            store.add_segment(s.start, s.end, s.range, Some(s.data.clone()));
        }

        let connectors = if self.params.repair_connectivity {
            connect::repair_connectivity(&mut store)?
        } else {
            0
        };
        let pruned = prune::prune_filaments(&mut store)?;
        let components = connect::components(&store)?.len();

        radial::build_half_edges(&mut store)?;
        let loops = trace::trace_loops(&store)?;

        debug!(
            input = self.segments.len(),
            removed_collisions,
            connectors,
            pruned,
            vertices = store.vertex_count(),
            segments = store.segment_count(),
            loops = loops.len(),
            "arrangement built"
        );

        Ok(Arrangement {
            loops,
            store,
            stats: ArrangementStats {
                removed_collisions,
                connectors,
                pruned,
                components,
            },
        })
    }
}

/// Counters describing how the input was repaired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrangementStats {
    /// Input segments dropped because they crossed or overlapped another.
    pub removed_collisions: usize,
    /// Synthetic segments added to join components.
    pub connectors: usize,
    /// Dangling segments removed.
    pub pruned: usize,
    /// Connected components of the final graph.
    pub components: usize,
}

/// Result of [`CreateFaces`]: the face loops plus the graph they came from.
#[derive(Debug)]
pub struct Arrangement<D> {
    loops: Vec<CutLoop<D>>,
    store: ArrangementStore<D>,
    stats: ArrangementStats,
}

impl<D> Arrangement<D> {
    #[must_use]
    pub fn loops(&self) -> &[CutLoop<D>] {
        &self.loops
    }

    #[must_use]
    pub fn into_loops(self) -> Vec<CutLoop<D>> {
        self.loops
    }

    /// The pruned graph with radially sorted half-edges.
    #[must_use]
    pub fn store(&self) -> &ArrangementStore<D> {
        &self.store
    }

    #[must_use]
    pub fn stats(&self) -> ArrangementStats {
        self.stats
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.store.segment_count()
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.stats.components
    }

    /// Index of the unbounded outer boundary in [`Self::loops`].
    #[must_use]
    pub fn outer_boundary(&self) -> Option<usize> {
        CutLoop::outer_boundary(&self.loops)
    }
}

/// Extracts the face loops of `segments` with default parameters.
///
/// # Errors
///
/// See [`CreateFaces::execute`].
pub fn create_faces<D: Clone>(segments: &[Segment<D>]) -> Result<Vec<CutLoop<D>>> {
    CreateFaces::new(segments.to_vec(), ArrangementParams::default())
        .execute()
        .map(Arrangement::into_loops)
}

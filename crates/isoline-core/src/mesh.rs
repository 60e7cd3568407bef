//! Contour output geometry.
//!
//! Naive extraction produces a list of [`Segment`]s. Indexed extraction produces
//! an [`IndexedContour`]: a deduplicated vertex buffer plus line-list index pairs,
//! laid out so it can be uploaded directly as vertex and index buffers.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A contour segment inside a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    #[must_use]
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Copy with endpoints in lexicographic `(x, y)` order.
    ///
    /// Two segments describe the same geometry iff their canonical forms are equal.
    #[must_use]
    pub fn canonical(self) -> Self {
        if (self.end.x, self.end.y) < (self.start.x, self.start.y) {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl From<Segment> for [[f64; 2]; 2] {
    fn from(segment: Segment) -> Self {
        [segment.start.to_array(), segment.end.to_array()]
    }
}

/// Vertex layout for GPU upload: a vec3 position with `z = 0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
}

/// Deduplicated contour mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedContour {
    /// Crossing points, one per crossed grid edge.
    pub vertices: Vec<DVec2>,
    /// Segments as pairs of indices into `vertices`.
    pub edges: Vec<[u32; 2]>,
}

impl IndexedContour {
    /// Returns the number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the contour has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Resolves every index pair to its endpoints.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        self.edges
            .iter()
            .map(|&[a, b]| Segment::new(self.vertices[a as usize], self.vertices[b as usize]))
            .collect()
    }

    /// Checks that every index addresses an existing vertex.
    ///
    /// Returns the first offending index on failure.
    pub fn validate(&self) -> std::result::Result<(), u32> {
        let len = self.vertices.len();
        self.edges
            .iter()
            .flatten()
            .find(|&&index| index as usize >= len)
            .map_or(Ok(()), |&index| Err(index))
    }

    /// Vertex buffer contents, narrowed to `f32`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn gpu_vertices(&self) -> Vec<GpuVertex> {
        self.vertices
            .iter()
            .map(|v| GpuVertex {
                position: [v.x as f32, v.y as f32, 0.0],
            })
            .collect()
    }

    /// Flattened line-list index buffer.
    #[must_use]
    pub fn index_buffer(&self) -> Vec<u32> {
        bytemuck::cast_slice(&self.edges).to_vec()
    }

    /// Raw bytes of [`Self::gpu_vertices`].
    #[must_use]
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.gpu_vertices()).to_vec()
    }

    /// Raw bytes of the index buffer.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.edges)
    }
}

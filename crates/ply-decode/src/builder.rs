//! Buffer building.
//!
//! Decoders fill a [`RawMesh`]; [`build`] turns it into the [`DecodedModel`]
//! handed to the renderer.

use glam::Vec3;

use crate::index::MeshIndex;

/// Normal assigned to vertices whose record carries none.
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Upper bound on records reserved up front from header counts.
///
/// Vectors still grow past this; it only limits what an untrusted header can
/// make us allocate before the body proves the records exist.
const MAX_RESERVED_RECORDS: usize = 1 << 16;

/// Decoded records before packing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh<I> {
    /// `x, y, z` per vertex, in file order.
    pub positions: Vec<f32>,
    /// `nx, ny, nz` per vertex, same indexing as `positions`.
    pub normals: Vec<f32>,
    /// Vertex indices, three per triangle.
    pub triangle_indices: Vec<I>,
}

impl<I: MeshIndex> RawMesh<I> {
    /// Create an empty mesh with room for the declared record counts.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        let vertices = vertex_count.min(MAX_RESERVED_RECORDS);
        let faces = face_count.min(MAX_RESERVED_RECORDS);
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            triangle_indices: Vec::with_capacity(faces * 3),
        }
    }

    /// Append a vertex, substituting [`DEFAULT_NORMAL`] when `normal` is `None`.
    pub fn push_vertex(&mut self, position: [f32; 3], normal: Option<[f32; 3]>) {
        self.positions.extend_from_slice(&position);
        self.normals.extend_from_slice(&normal.unwrap_or(DEFAULT_NORMAL));
    }

    /// Append one triangle.
    pub fn push_triangle(&mut self, indices: [I; 3]) {
        self.triangle_indices.extend_from_slice(&indices);
    }
}

impl<I: MeshIndex> Default for RawMesh<I> {
    fn default() -> Self {
        Self::with_capacity(0, 0)
    }
}

/// Flat mesh buffers ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedModel<I = u32> {
    /// `3 * vertex_count` position components.
    pub position_buffer: Vec<f32>,
    /// `3 * vertex_count` normal components.
    pub normal_buffer: Vec<f32>,
    /// `3 * triangle_count` vertex indices.
    pub index_buffer: Vec<I>,
    pub triangle_count: usize,
}

/// Axis-aligned bounds of a model's positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the sphere through the box corners.
    #[must_use]
    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }
}

impl<I> DecodedModel<I> {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.position_buffer.len() / 3
    }

    /// Compute the bounds of all positions, or `None` for an empty model.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut points = self
            .position_buffer
            .chunks_exact(3)
            .map(Vec3::from_slice);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(BoundingBox { min, max })
    }
}

/// Pack decoded records into output buffers.
///
/// Moves the arrays without reordering; the only derived value is the
/// triangle count.
#[must_use]
pub fn build<I: MeshIndex>(raw: RawMesh<I>) -> DecodedModel<I> {
    let RawMesh {
        positions,
        normals,
        triangle_indices,
    } = raw;
    debug_assert_eq!(positions.len(), normals.len());
    debug_assert_eq!(triangle_indices.len() % 3, 0);

    DecodedModel {
        triangle_count: triangle_indices.len() / 3,
        position_buffer: positions,
        normal_buffer: normals,
        index_buffer: triangle_indices,
    }
}

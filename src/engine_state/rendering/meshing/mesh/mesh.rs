//! Mesh data structures for voxel rendering.
//!
//! A [`ChunkMesh`] holds three parallel, renderer-agnostic buffers: flat vertex
//! positions, flat vertex normals and triangle indices. The GPU layout is built from
//! it later by [`Vertex::from_mesh`](crate::engine_state::rendering::Vertex::from_mesh).

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

use super::face::Face;

/// The triangle surface of a single chunk, in chunk-local coordinates.
///
/// Invariants:
/// - `normals.len() == vertices.len()`, three floats per vertex in both
/// - every index is smaller than the vertex count
/// - indices come in triples, each an outward-facing counter-clockwise triangle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions, three floats per vertex
    pub vertices: Vec<f32>,
    /// Vertex normals, three floats per vertex
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex list
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a face's four vertices and two triangles.
    ///
    /// Vertices are never shared between faces.
    pub fn add_face(&mut self, face: &Face) {
        let first_vertex = self.vertex_count() as u32;
        let normal = face.normal();

        for corner in face.corners {
            self.vertices.extend_from_slice(&[corner.x, corner.y, corner.z]);
            self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
        }
        self.indices
            .extend_from_slice(&face.generate_face_indices(first_vertex));
    }

    /// The number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// The number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Returns `true` if the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The position of a vertex.
    pub fn vertex(&self, index: usize) -> Point3<f32> {
        Point3::new(
            self.vertices[index * 3],
            self.vertices[index * 3 + 1],
            self.vertices[index * 3 + 2],
        )
    }

    /// The normal of a vertex.
    pub fn normal(&self, index: usize) -> Vector3<f32> {
        Vector3::new(
            self.normals[index * 3],
            self.normals[index * 3 + 1],
            self.normals[index * 3 + 2],
        )
    }
}

/// A chunk mesh tagged with the grid position of the chunk it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMeshResult {
    /// Grid position of the source chunk
    pub grid_position: Point3<i32>,
    /// The chunk's mesh in chunk-local coordinates
    pub mesh: ChunkMesh,
}

impl ChunkMeshResult {
    /// The world-space translation applied to this mesh when drawn.
    pub fn world_offset(&self) -> Vector3<f32> {
        chunk_world_offset(self.grid_position)
    }
}

/// The world-space translation of a chunk's mesh.
///
/// Each axis is the grid position multiplied by half the chunk dimension along that
/// axis. With 16-wide chunks, neighbouring meshes overlap by half a chunk rather than
/// tiling edge to edge.
pub fn chunk_world_offset(grid_position: Point3<i32>) -> Vector3<f32> {
    Vector3::new(
        grid_position.x as f32 * (CHUNK_WIDTH / 2) as f32,
        grid_position.y as f32 * (CHUNK_HEIGHT / 2) as f32,
        grid_position.z as f32 * (CHUNK_DEPTH / 2) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    #[test]
    fn faces_append_without_sharing_vertices() {
        let mut mesh = ChunkMesh::new();
        mesh.add_face(&Face::new(0, 0, 0, BlockSide::TOP));
        mesh.add_face(&Face::new(0, 0, 0, BlockSide::BOTTOM));

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2, 4, 5, 6, 4, 7, 5]);
        assert_eq!(mesh.normal(0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.normal(7), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.vertex(0), Point3::new(0.5, 0.5, 0.5));
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn world_offset_uses_half_chunk_steps() {
        assert_eq!(
            chunk_world_offset(Point3::new(1, 0, -2)),
            Vector3::new(8.0, 0.0, -16.0)
        );
        assert_eq!(
            chunk_world_offset(Point3::new(0, 0, 0)),
            Vector3::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn world_offset_covers_the_whole_grid() {
        let offset = chunk_world_offset(Point3::new(i32::MAX / 4, i32::MIN, i32::MAX));

        assert_eq!(offset.x, (i32::MAX / 4) as f32 * 8.0);
        assert_eq!(offset.y, i32::MIN as f32 * 8.0);
        assert_eq!(offset.z, i32::MAX as f32 * 8.0);
        assert!(offset.x.is_finite() && offset.y.is_finite() && offset.z.is_finite());
    }
}

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is four corners sitting half a unit from the voxel's centre, plus the two
/// triangles that cover them. Every side has its own corner order and its own
/// triangle winding, chosen so the triangles wind counter-clockwise when viewed from
/// outside the voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners of the face in chunk-local space
    pub corners: [Point3<f32>; 4],
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the voxel centred at (i, j, k).
    pub fn new(i: usize, j: usize, k: usize, block_side: BlockSide) -> Self {
        let centre = Point3::new(i as f32, j as f32, k as f32);
        let corners = Self::corner_offsets(block_side).map(|offset| centre + Vector3::from(offset));

        Face {
            corners,
            block_side,
        }
    }

    /// The corner offsets from a voxel's centre for each side.
    pub fn corner_offsets(block_side: BlockSide) -> [[f32; 3]; 4] {
        match block_side {
            BlockSide::TOP => [
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
            ],

            BlockSide::BOTTOM => [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, -0.5],
            ],

            BlockSide::LEFT => [
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, -0.5, -0.5],
            ],

            BlockSide::RIGHT => [
                [0.5, -0.5, 0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
                [0.5, -0.5, -0.5],
            ],

            BlockSide::BACK => [
                [0.5, 0.5, -0.5],
                [0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [-0.5, -0.5, -0.5],
            ],

            BlockSide::FRONT => [
                [-0.5, 0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        }
    }

    /// The two triangles of a face, as offsets into its four corners.
    pub fn winding(block_side: BlockSide) -> [u32; 6] {
        match block_side {
            BlockSide::TOP | BlockSide::LEFT | BlockSide::BACK => [0, 1, 2, 1, 3, 2],
            BlockSide::BOTTOM | BlockSide::RIGHT | BlockSide::FRONT => [0, 1, 2, 0, 3, 1],
        }
    }

    /// Generates the indices for this face, given the index of its first vertex.
    pub fn generate_face_indices(&self, first_vertex: u32) -> [u32; 6] {
        Self::winding(self.block_side).map(|offset| first_vertex + offset)
    }

    /// The outward normal shared by all four corners.
    pub fn normal(&self) -> Vector3<f32> {
        self.block_side.normal()
    }
}

//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block, along with the
//! neighbour offset and outward normal belonging to each face.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order returned by [`BlockSide::all`] is the order in which the mesh generator
/// visits faces: [TOP, BOTTOM, LEFT, RIGHT, BACK, FRONT].
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The back face (facing negative Z)
    BACK = 4,

    /// The front face (facing positive Z)
    FRONT = 5,
}

impl BlockSide {
    /// Returns all six block faces in mesh emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::BACK,
            BlockSide::FRONT,
        ]
    }

    /// The offset from a voxel to the neighbour that shares this face.
    pub fn neighbor_offset(self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let offset = self.neighbor_offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn normals_are_unit_and_opposite_in_pairs() {
        for side in BlockSide::all() {
            assert_eq!(side.normal().magnitude(), 1.0);
        }
        assert_eq!(BlockSide::TOP.normal(), -BlockSide::BOTTOM.normal());
        assert_eq!(BlockSide::LEFT.normal(), -BlockSide::RIGHT.normal());
        assert_eq!(BlockSide::BACK.normal(), -BlockSide::FRONT.normal());
    }
}

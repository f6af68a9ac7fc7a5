//! # Chunk Index Module
//!
//! The single definition of how local voxel coordinates map onto a chunk's flat
//! storage, and how a coordinate that has left one chunk is carried into the next.
//!
//! Storage is ordered `index = z * W * H + y * W + x`: x varies fastest, then y,
//! then z.

use cgmath::{Point3, Vector3};

use super::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_PLANE_SIZE, CHUNK_WIDTH};

/// Coordinate/index conversions for a single chunk.
pub struct ChunkIndex;

impl ChunkIndex {
    /// Returns `true` if the local coordinate lies inside a chunk.
    #[inline]
    pub fn in_bounds(local: Point3<i32>) -> bool {
        (0..CHUNK_WIDTH).contains(&local.x)
            && (0..CHUNK_HEIGHT).contains(&local.y)
            && (0..CHUNK_DEPTH).contains(&local.z)
    }

    /// Flattens an in-bounds local coordinate.
    ///
    /// # Panics
    /// Debug builds panic if the coordinate lies outside the chunk.
    #[inline]
    pub fn to_index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < CHUNK_WIDTH as usize);
        debug_assert!(y < CHUNK_HEIGHT as usize);
        debug_assert!(z < CHUNK_DEPTH as usize);
        z * CHUNK_PLANE_SIZE + y * CHUNK_WIDTH as usize + x
    }

    /// Flattens a possibly out-of-bounds local coordinate.
    ///
    /// # Returns
    /// `None` when the coordinate is not part of the chunk's own storage.
    #[inline]
    pub fn try_index(local: Point3<i32>) -> Option<usize> {
        if Self::in_bounds(local) {
            Some(Self::to_index(
                local.x as usize,
                local.y as usize,
                local.z as usize,
            ))
        } else {
            None
        }
    }

    /// Computes the unit step, in grid-position space, towards the chunk that owns an
    /// out-of-bounds local coordinate.
    ///
    /// Each axis is `-1` below the chunk, `+1` above it and `0` within range, so corner
    /// coordinates may step along more than one axis at once.
    pub fn boundary_offset(local: Point3<i32>) -> Vector3<i32> {
        fn axis(value: i32, dimension: i32) -> i32 {
            if value < 0 {
                -1
            } else if value >= dimension {
                1
            } else {
                0
            }
        }

        Vector3::new(
            axis(local.x, CHUNK_WIDTH),
            axis(local.y, CHUNK_HEIGHT),
            axis(local.z, CHUNK_DEPTH),
        )
    }

    /// Re-expresses a local coordinate in the space of the neighbour reached by
    /// `offset`, shifting by one chunk dimension on every offset axis.
    pub fn translate_into_neighbor(local: Point3<i32>, offset: Vector3<i32>) -> Point3<i32> {
        Point3::new(
            local.x - offset.x * CHUNK_WIDTH,
            local.y - offset.y * CHUNK_HEIGHT,
            local.z - offset.z * CHUNK_DEPTH,
        )
    }
}

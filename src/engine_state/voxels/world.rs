//! # World Module
//!
//! This module provides the `World` struct which indexes the chunks of the voxel
//! world by their grid position.
//!
//! ## Architecture
//!
//! The world is a sparse arena: a hash map from integer grid position to the chunk
//! stored there. It holds no voxels of its own. Lookups hand out shared borrows, which
//! is all the mesh generator needs to walk from one chunk into its neighbours.
//!
//! A missing chunk is a normal answer, not a fault. The world never creates chunks
//! implicitly, so anything beyond the generated grid is open air.

use std::collections::HashMap;

use cgmath::{Point3, Vector3};
use log::{debug, info, warn};

use crate::engine_state::voxels::chunk::Chunk;

/// Represents a voxel world composed of multiple chunks.
///
/// At most one chunk exists per grid position.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::engine_state::voxels::{chunk::Chunk, world::World};
///
/// let mut world = World::new();
/// world.add_chunk(Chunk::new(Point3::new(0, 0, 0)));
///
/// assert!(world.get_chunk(0, 0, 0).is_some());
/// assert!(world.get_chunk(1, 0, 0).is_none());
/// ```
#[derive(Default, Debug)]
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<Point3<i32>, Chunk>,
}

/// Converts an extent along one axis into an exclusive grid bound.
fn grid_limit(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or_else(|_| {
        warn!("World extent {} exceeds the grid, clamping to {}", extent, i32::MAX);
        i32::MAX
    })
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            chunks: HashMap::new(),
        }
    }

    /// Creates a world with a terrain-filled chunk at every grid position in
    /// `0..extent.x` x `0..extent.y` x `0..extent.z`.
    ///
    /// Extents past `i32::MAX` are clamped to the largest grid the positions can
    /// address.
    pub fn generate(extent: Vector3<u32>) -> Self {
        let mut world = World::new();
        let (ex, ey, ez) = (
            grid_limit(extent.x),
            grid_limit(extent.y),
            grid_limit(extent.z),
        );

        for x in 0..ex {
            for y in 0..ey {
                for z in 0..ez {
                    world.add_chunk(Chunk::new(Point3::new(x, y, z)));
                }
            }
        }

        info!(
            "Generated world of {} chunks ({}x{}x{})",
            world.len(),
            extent.x,
            extent.y,
            extent.z
        );
        world
    }

    /// Adds a chunk at its own grid position.
    ///
    /// # Returns
    /// The chunk previously stored at that position, if any.
    pub fn add_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        let position = chunk.position();
        let replaced = self.chunks.insert(position, chunk);
        if replaced.is_some() {
            debug!("Replaced chunk at {:?}", position);
        }
        replaced
    }

    /// Retrieves the chunk at the given grid coordinates.
    ///
    /// # Returns
    /// `None` when no chunk exists there.
    #[inline]
    pub fn get_chunk(&self, gx: i32, gy: i32, gz: i32) -> Option<&Chunk> {
        self.get_chunk_at(Point3::new(gx, gy, gz))
    }

    /// [`World::get_chunk`] taking a point.
    #[inline]
    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Iterates every chunk in the world, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// The number of chunks in the world.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if the world holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

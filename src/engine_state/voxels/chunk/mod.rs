//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed 16x16x16 grid of block codes
//! together with the chunk's position in the world's chunk lattice.
//!
//! ## Storage
//!
//! Voxels are kept in one flat vector of `CHUNK_SIZE` codes, laid out by
//! [`ChunkIndex`]. A dense flat array is the cheapest representation for a grid this
//! small, and it keeps every lookup a single multiply-add.
//!
//! ## Bounds
//!
//! [`Chunk::get_voxel`] answers air for any coordinate outside the chunk. That local
//! default is intentionally dumber than the cross-chunk lookup the mesh generator
//! performs, which asks the neighbouring chunk before giving up.

use cgmath::Point3;
use chunk_creation::ChunkCreationIterator;

use super::block::{block_type::BlockType, is_solid, BlockTypeSize, AIR_CODE};

mod chunk_creation;
pub mod chunk_index;
pub mod chunk_iteration;

pub use chunk_index::ChunkIndex;
pub use chunk_iteration::ChunkBlockIterator;

/// Number of voxels along the x axis of a chunk.
pub const CHUNK_WIDTH: i32 = 16;
/// Number of voxels along the y axis of a chunk.
pub const CHUNK_HEIGHT: i32 = 16;
/// Number of voxels along the z axis of a chunk.
pub const CHUNK_DEPTH: i32 = 16;
/// The edge length used when placing chunk meshes in world space.
pub const CHUNK_DIMENSION: i32 = CHUNK_WIDTH;
/// The number of voxels in one z slice of a chunk.
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_WIDTH * CHUNK_HEIGHT) as usize;
/// The total number of voxels in a chunk.
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_DEPTH as usize;

/// Layers below this height are filled with the base material.
const BASE_LAYER_TOP: i32 = 6;
/// The surface layer; everything below it is filled.
const SURFACE_LAYER: i32 = 9;
/// A single voxel that sticks out of the surface of every generated chunk.
const SURFACE_MARKER: Point3<i32> = Point3::new(4, 10, 5);

/// A 16x16x16 block of voxel storage.
///
/// Chunks are immutable once constructed. The grid position identifies the chunk's
/// slot in the world, not a voxel coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: Point3<i32>,
    /// Block codes in [`ChunkIndex`] order.
    voxels: Vec<BlockTypeSize>,
}

impl Chunk {
    /// Creates a chunk filled with the default terrain.
    ///
    /// The fill ignores the grid position, so every chunk in the world receives the
    /// same pattern:
    /// - y in `0..6` is [`BlockType::BASE`]
    /// - y in `6..9` is [`BlockType::SECONDARY`]
    /// - y == 9 is [`BlockType::TOP`]
    /// - the single voxel at (4, 10, 5) is [`BlockType::TOP`]
    /// - everything else is air
    pub fn new(position: Point3<i32>) -> Self {
        let mut cci = ChunkCreationIterator::new(position);

        for _z in 0..CHUNK_DEPTH {
            for y in 0..CHUNK_HEIGHT {
                for _x in 0..CHUNK_WIDTH {
                    cci.push_block_type(Self::terrain_block_at(y));
                }
            }
        }
        cci.override_block_at(SURFACE_MARKER, BlockType::TOP);

        cci.return_chunk()
    }

    fn terrain_block_at(y: i32) -> BlockType {
        if y == SURFACE_LAYER {
            BlockType::TOP
        } else if y > SURFACE_LAYER {
            BlockType::AIR
        } else if y >= BASE_LAYER_TOP {
            BlockType::SECONDARY
        } else {
            BlockType::BASE
        }
    }

    /// Creates a chunk containing only air.
    pub fn empty(position: Point3<i32>) -> Self {
        ChunkCreationIterator::new(position).return_chunk()
    }

    /// Creates a chunk where every voxel holds `code`.
    pub fn solid(position: Point3<i32>, code: BlockTypeSize) -> Self {
        let mut cci = ChunkCreationIterator::new(position);
        for _ in 0..CHUNK_SIZE {
            cci.push_code(code);
        }
        cci.return_chunk()
    }

    /// Creates a chunk from raw block codes in [`ChunkIndex`] order.
    ///
    /// # Returns
    /// `None` if `voxels` does not hold exactly `CHUNK_SIZE` codes.
    pub fn from_voxels(position: Point3<i32>, voxels: Vec<BlockTypeSize>) -> Option<Self> {
        if voxels.len() != CHUNK_SIZE {
            return None;
        }
        Some(Chunk { position, voxels })
    }

    /// The chunk's position in the world's chunk lattice.
    #[inline]
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// The chunk's raw storage.
    pub fn voxels(&self) -> &[BlockTypeSize] {
        &self.voxels
    }

    /// Gets the block code at a local coordinate.
    ///
    /// # Returns
    /// The stored code, or air for any coordinate outside the chunk.
    #[inline]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        self.get_voxel_at(Point3::new(x, y, z))
    }

    /// [`Chunk::get_voxel`] taking a point.
    #[inline]
    pub fn get_voxel_at(&self, local: Point3<i32>) -> BlockTypeSize {
        match ChunkIndex::try_index(local) {
            Some(index) => self.voxels[index],
            None => AIR_CODE,
        }
    }

    /// Counts the non-air voxels in the chunk.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|code| is_solid(**code)).count()
    }

    /// Iterates the solid voxels of the chunk in meshing order.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }
}

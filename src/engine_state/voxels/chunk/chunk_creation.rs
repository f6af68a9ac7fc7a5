//! # Chunk Creation Module
//!
//! A small builder that fills a chunk's flat storage in storage order and then hands
//! the finished, immutable [`Chunk`] back. Chunks have no editing API once built, so
//! every constructor goes through here.

use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::BlockType, BlockTypeSize, AIR_CODE};

use super::{chunk_index::ChunkIndex, Chunk, CHUNK_SIZE};

/// Builds a chunk's voxel storage one block at a time.
///
/// Blocks are pushed in storage order (x fastest, then y, then z). Any slots left
/// unfilled when the chunk is returned stay air.
pub struct ChunkCreationIterator {
    /// The grid position of the chunk being created
    position: Point3<i32>,
    /// Block codes pushed so far
    voxels: Vec<BlockTypeSize>,
}

impl ChunkCreationIterator {
    /// Creates a builder for a chunk at the given grid position.
    pub fn new(position: Point3<i32>) -> Self {
        ChunkCreationIterator {
            position,
            voxels: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Appends a block at the next storage slot.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        self.push_code(block_type.code());
    }

    /// Appends a raw block code at the next storage slot.
    ///
    /// Pushes past the end of the chunk are ignored.
    pub fn push_code(&mut self, code: BlockTypeSize) {
        if self.voxels.len() < CHUNK_SIZE {
            self.voxels.push(code);
        }
    }

    /// Forces the block at a local coordinate, regardless of what was pushed there.
    ///
    /// Coordinates outside the chunk are ignored.
    pub fn override_block_at(&mut self, local: Point3<i32>, block_type: BlockType) {
        if let Some(index) = ChunkIndex::try_index(local) {
            if index >= self.voxels.len() {
                self.voxels.resize(index + 1, AIR_CODE);
            }
            self.voxels[index] = block_type.code();
        }
    }

    /// Finalizes the chunk, padding any remaining slots with air.
    pub fn return_chunk(mut self) -> Chunk {
        self.voxels.resize(CHUNK_SIZE, AIR_CODE);
        Chunk {
            position: self.position,
            voxels: self.voxels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfilled_slots_are_air() {
        let mut cci = ChunkCreationIterator::new(Point3::new(0, 0, 0));
        cci.push_block_type(BlockType::BASE);
        let chunk = cci.return_chunk();

        assert_eq!(chunk.voxels().len(), CHUNK_SIZE);
        assert_eq!(chunk.get_voxel(0, 0, 0), 1);
        assert_eq!(chunk.get_voxel(1, 0, 0), 0);
    }

    #[test]
    fn override_wins_over_pushed_block() {
        let mut cci = ChunkCreationIterator::new(Point3::new(0, 0, 0));
        for _ in 0..CHUNK_SIZE {
            cci.push_block_type(BlockType::BASE);
        }
        cci.push_block_type(BlockType::TOP);
        cci.override_block_at(Point3::new(2, 3, 4), BlockType::AIR);
        let chunk = cci.return_chunk();

        assert_eq!(chunk.get_voxel(2, 3, 4), 0);
        assert_eq!(chunk.solid_count(), CHUNK_SIZE - 1);
    }

    #[test]
    fn codes_past_the_end_are_dropped() {
        let mut cci = ChunkCreationIterator::new(Point3::new(0, 0, 0));
        for _ in 0..CHUNK_SIZE {
            cci.push_code(2);
        }
        cci.push_code(7);
        let chunk = cci.return_chunk();

        assert_eq!(chunk.voxels().len(), CHUNK_SIZE);
        assert!(chunk.voxels().iter().all(|&code| code == 2));
    }
}

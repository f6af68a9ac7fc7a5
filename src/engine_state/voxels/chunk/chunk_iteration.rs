//! # Chunk Iteration Module
//!
//! Walks the solid voxels of a chunk in meshing order: y outermost, then z, then x.
//! This is deliberately not storage order; the mesh generator emits faces in this
//! order and its output is compared across runs.

use cgmath::Point3;

use crate::engine_state::voxels::block::{is_solid, BlockTypeSize};

use super::{chunk_index::ChunkIndex, Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// An iterator over all non-air voxels in a chunk, yielding local positions and codes.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    local_x: usize,
    local_y: usize,
    local_z: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates an iterator positioned before the first voxel of the chunk.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    fn advance(&mut self) {
        self.local_x += 1;
        if self.local_x == CHUNK_WIDTH as usize {
            self.local_x = 0;
            self.local_z += 1;
            if self.local_z == CHUNK_DEPTH as usize {
                self.local_z = 0;
                self.local_y += 1;
            }
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (Point3<usize>, BlockTypeSize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.local_y < CHUNK_HEIGHT as usize {
            let position = Point3::new(self.local_x, self.local_y, self.local_z);
            let code = self.chunk_ref.voxels
                [ChunkIndex::to_index(position.x, position.y, position.z)];
            self.advance();

            if is_solid(code) {
                return Some((position, code));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::CHUNK_SIZE;

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = Chunk::empty(Point3::new(0, 0, 0));
        assert_eq!(ChunkBlockIterator::new(&chunk).count(), 0);
    }

    #[test]
    fn solid_chunk_yields_every_voxel_y_major() {
        let chunk = Chunk::solid(Point3::new(0, 0, 0), 7);
        let visited: Vec<_> = ChunkBlockIterator::new(&chunk).collect();

        assert_eq!(visited.len(), CHUNK_SIZE);
        assert_eq!(visited[0], (Point3::new(0, 0, 0), 7));
        assert_eq!(visited[1].0, Point3::new(1, 0, 0));
        assert_eq!(visited[CHUNK_WIDTH as usize].0, Point3::new(0, 0, 1));
        assert_eq!(
            visited[(CHUNK_WIDTH * CHUNK_DEPTH) as usize].0,
            Point3::new(0, 1, 0)
        );
    }

    #[test]
    fn skips_air() {
        let chunk = Chunk::new(Point3::new(0, 0, 0));
        assert!(ChunkBlockIterator::new(&chunk).all(|(_, code)| code != 0));
        assert_eq!(ChunkBlockIterator::new(&chunk).count(), chunk.solid_count());
    }
}

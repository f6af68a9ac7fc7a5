//! # Voxel Core
//!
//! This module contains the voxel data model: block codes, fixed-size chunks and the
//! world that indexes them.
//!
//! ## Architecture
//!
//! * **Block**: block codes (0 is air) and the six block faces
//! * **Chunk**: a 16x16x16 grid of block codes with a grid position
//! * **World**: a sparse map from grid position to chunk
//!
//! ## Data Flow
//!
//! 1. The world is generated once at startup
//! 2. The mesh generator reads the world and one chunk at a time
//! 3. Chunk meshes are handed to the renderer
//!
//! Nothing in here changes after construction, so shared borrows of the world can be
//! handed to as many readers as needed.

pub mod block;
pub mod chunk;
pub mod world;

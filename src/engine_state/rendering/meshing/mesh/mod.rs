//! Mesh generation for voxel rendering.
//!
//! This module converts voxel chunks into triangle meshes. Only faces between a solid
//! voxel and empty space are emitted; faces on a chunk boundary consult the
//! neighbouring chunk through the world before deciding.
//!
//! # Architecture
//! - [`ChunkMesh`]: flat vertex, normal and index buffers for one chunk
//! - [`Face`]: a single quad of a voxel with its corners and winding
//! - [`create_meshes`]: face-culled meshing of every chunk in a world
//!
//! # Usage
//! ```
//! use cgmath::Vector3;
//! use voxel_world::engine_state::{
//!     rendering::meshing::mesh::create_meshes,
//!     voxels::world::World,
//! };
//!
//! let world = World::generate(Vector3::new(2, 1, 2));
//! let meshes = create_meshes(&world);
//! assert_eq!(meshes.len(), 4);
//! ```

mod culled;
mod face;
mod mesh;

pub use culled::{create_meshes, generate_chunk_mesh, has_voxel};
pub use face::Face;
pub use mesh::*;

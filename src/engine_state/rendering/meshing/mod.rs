//! Mesh generation and GPU upload for voxel rendering.
//!
//! Each chunk is meshed independently and gets its own vertex, index and placement
//! buffers, keyed by the chunk's grid position in the [`BufferState`].
//!
//! # Architecture
//! - `mesh/`: face-culled mesh generation, CPU side only
//! - `MeshManager`: uploads chunk meshes and remembers what to draw
//! - `MeshingRenderer`: the pipeline that draws them

use cgmath::Point3;
use log::{debug, info};
use wgpu::Device;

pub mod mesh;
mod renderer;

pub use mesh::*;
pub use renderer::*;

use crate::engine_state::{
    buffer_state::{BufferKey, BufferState},
    rendering::vertex::{ChunkPlacement, Vertex},
};

/// One indexed draw of one chunk mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDrawCommand {
    /// Grid position of the chunk, which also keys its buffers
    pub grid_position: Point3<i32>,
    /// Number of indices to draw
    pub index_count: u32,
}

impl ChunkDrawCommand {
    /// Key of the chunk's vertex buffer.
    pub fn vertex_buffer(&self) -> BufferKey {
        BufferKey::ChunkVertices(self.grid_position)
    }

    /// Key of the chunk's index buffer.
    pub fn index_buffer(&self) -> BufferKey {
        BufferKey::ChunkIndices(self.grid_position)
    }

    /// Key of the chunk's placement buffer.
    pub fn placement_buffer(&self) -> BufferKey {
        BufferKey::ChunkPlacement(self.grid_position)
    }
}

/// Tracks which chunk meshes live on the GPU.
#[derive(Debug, Default)]
pub struct MeshManager {
    draw_commands: Vec<ChunkDrawCommand>,
}

impl MeshManager {
    /// Creates a manager with nothing uploaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every uploaded chunk mesh with `meshes`.
    ///
    /// Empty meshes get no buffers and no draw command.
    pub fn upload_meshes(
        &mut self,
        device: &Device,
        buffer_state: &mut BufferState,
        meshes: &[ChunkMeshResult],
    ) {
        buffer_state.clear_chunk_buffers();
        self.draw_commands = Self::plan_draws(meshes);

        for result in meshes.iter().filter(|result| !result.mesh.is_empty()) {
            let position = result.grid_position;
            let vertices = Vertex::from_mesh(&result.mesh);
            let placement = ChunkPlacement::new(result.world_offset());

            buffer_state.create_buffer_init(
                device,
                BufferKey::ChunkVertices(position),
                bytemuck::cast_slice(&vertices),
                wgpu::BufferUsages::VERTEX,
            );
            buffer_state.create_buffer_init(
                device,
                BufferKey::ChunkIndices(position),
                bytemuck::cast_slice(&result.mesh.indices),
                wgpu::BufferUsages::INDEX,
            );
            buffer_state.create_buffer_init(
                device,
                BufferKey::ChunkPlacement(position),
                bytemuck::cast_slice(&[placement]),
                wgpu::BufferUsages::VERTEX,
            );
            debug!(
                "Uploaded chunk {:?}: {} vertices, {} indices",
                position,
                vertices.len(),
                result.mesh.indices.len()
            );
        }

        info!(
            "Uploaded {} chunk meshes, {} bytes of GPU buffers",
            self.draw_commands.len(),
            buffer_state.get_total_allocated_memory()
        );
    }

    /// One draw per non-empty mesh, in the order given.
    pub fn plan_draws(meshes: &[ChunkMeshResult]) -> Vec<ChunkDrawCommand> {
        meshes
            .iter()
            .filter(|result| !result.mesh.is_empty())
            .map(|result| ChunkDrawCommand {
                grid_position: result.grid_position,
                index_count: result.mesh.indices.len() as u32,
            })
            .collect()
    }

    /// Draws planned by the last upload.
    pub fn draw_commands(&self) -> &[ChunkDrawCommand] {
        &self.draw_commands
    }
}

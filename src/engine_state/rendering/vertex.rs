//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the per-vertex and per-instance formats the voxel pipeline
//! consumes, and the conversion from a [`ChunkMesh`] into GPU-ready vertices.

use cgmath::Vector3;

use super::meshing::ChunkMesh;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Interleaves a mesh's parallel position and normal buffers.
    pub fn from_mesh(mesh: &ChunkMesh) -> Vec<Vertex> {
        mesh.vertices
            .chunks_exact(3)
            .zip(mesh.normals.chunks_exact(3))
            .map(|(position, normal)| Vertex {
                position: [position[0], position[1], position[2]],
                normal: [normal[0], normal[1], normal[2]],
            })
            .collect()
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Per-chunk instance data: the world-space translation of a chunk's mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ChunkPlacement {
    /// World-space translation of the chunk mesh
    pub offset: [f32; 3],
}

impl ChunkPlacement {
    /// Wraps a world-space offset.
    pub fn new(offset: Vector3<f32>) -> Self {
        Self {
            offset: offset.into(),
        }
    }

    /// Instance buffer layout; `location = 2` holds the offset.
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ChunkPlacement>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

//! # Buffer State Module
//!
//! A registry of the GPU buffers the renderer draws from. Buffers are keyed by
//! [`BufferKey`], which names the buffer's role and, for per-chunk buffers, the grid
//! position of the chunk it belongs to.
//!
//! ## Analytics
//!
//! Allocated sizes are tracked per buffer so writes can be bounds-checked and the
//! total can be logged after an upload.

use std::collections::HashMap;

use cgmath::Point3;
use log::debug;
use wgpu::{util::DeviceExt, Buffer, Device, Queue};

use crate::error::{VoxelWorldError, VoxelWorldResult};

/// Identifies a buffer in the [`BufferState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKey {
    /// The camera uniform
    Camera,
    /// Interleaved position and normal vertices of a chunk mesh
    ChunkVertices(Point3<i32>),
    /// Triangle indices of a chunk mesh
    ChunkIndices(Point3<i32>),
    /// The single-instance placement offset of a chunk mesh
    ChunkPlacement(Point3<i32>),
}

impl BufferKey {
    /// A debug label for the buffer.
    pub fn label(&self) -> String {
        match self {
            BufferKey::Camera => "Camera Buffer".to_string(),
            BufferKey::ChunkVertices(p) => format!("Vertex Buffer {} {} {}", p.x, p.y, p.z),
            BufferKey::ChunkIndices(p) => format!("Index Buffer {} {} {}", p.x, p.y, p.z),
            BufferKey::ChunkPlacement(p) => format!("Placement Buffer {} {} {}", p.x, p.y, p.z),
        }
    }
}

/// Analytics data for a GPU buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BufferAnalytics {
    /// Total memory allocated for the buffer in bytes
    allocated_memory: u64,
}

/// Central registry for GPU buffers.
///
/// The registry does not own the device or queue; callers pass them in, which keeps
/// the buffer bookkeeping free of shared ownership.
#[derive(Default)]
pub struct BufferState {
    buffers: HashMap<BufferKey, Buffer>,
    buffer_analytics: HashMap<BufferKey, BufferAnalytics>,
}

impl BufferState {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer initialised with `contents`, replacing any buffer under the
    /// same key.
    pub fn create_buffer_init(
        &mut self,
        device: &Device,
        key: BufferKey,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) {
        let label = key.label();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents,
            usage,
        });

        self.buffers.insert(key, buffer);
        self.buffer_analytics.insert(
            key,
            BufferAnalytics {
                allocated_memory: contents.len() as u64,
            },
        );
    }

    /// Writes raw byte data to an existing buffer.
    ///
    /// # Errors
    /// Fails if the buffer does not exist or the write would run past its end.
    pub fn write_buffer(
        &self,
        queue: &Queue,
        key: BufferKey,
        offset: wgpu::BufferAddress,
        data: &[u8],
    ) -> VoxelWorldResult<()> {
        let buffer = self
            .buffers
            .get(&key)
            .ok_or_else(|| VoxelWorldError::MissingBuffer(key.label()))?;
        let size = self
            .buffer_analytics
            .get(&key)
            .map_or(0, |analytics| analytics.allocated_memory);

        let end = offset + data.len() as u64;
        if end > size {
            return Err(VoxelWorldError::BufferOverflow {
                label: key.label(),
                end,
                size,
            });
        }

        queue.write_buffer(buffer, offset, data);
        Ok(())
    }

    /// Gets a buffer by key.
    pub fn get_buffer(&self, key: BufferKey) -> Option<&Buffer> {
        self.buffers.get(&key)
    }

    /// Gets a binding resource for the entire buffer.
    pub fn get_entire_binding(&self, key: BufferKey) -> VoxelWorldResult<wgpu::BindingResource> {
        self.get_buffer(key)
            .map(Buffer::as_entire_binding)
            .ok_or_else(|| VoxelWorldError::MissingBuffer(key.label()))
    }

    /// Drops every per-chunk buffer, keeping the camera uniform.
    pub fn clear_chunk_buffers(&mut self) {
        self.buffers.retain(|key, _| matches!(key, BufferKey::Camera));
        self.buffer_analytics
            .retain(|key, _| matches!(key, BufferKey::Camera));
        debug!("Released chunk buffers");
    }

    /// Total allocated memory across all buffers, in bytes.
    pub fn get_total_allocated_memory(&self) -> u64 {
        self.buffer_analytics
            .values()
            .map(|analytics| analytics.allocated_memory)
            .sum()
    }
}

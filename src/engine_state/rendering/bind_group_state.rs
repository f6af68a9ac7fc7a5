//! Bind groups shared by the render pipelines.
//!
//! The voxel shader reads one uniform: the camera's view-projection matrix and
//! position, at group 0, binding 0.

use wgpu::{BindGroup, BindGroupLayout, Device};

use crate::{
    engine_state::buffer_state::{BufferKey, BufferState},
    error::VoxelWorldResult,
};

/// Label of the camera bind group.
pub const CAMERA_BIND_GROUP: &str = "Camera Bind Group";
/// Label of the camera bind group layout.
pub const CAMERA_BIND_GROUP_LAYOUT: &str = "Camera Bind Group Layout";

/// Owns the bind groups and their layouts.
pub struct BindGroupState {
    camera_bind_group: BindGroup,
    camera_bind_group_layout: BindGroupLayout,
}

impl BindGroupState {
    /// Creates the camera bind group over the camera uniform buffer.
    ///
    /// # Errors
    /// Fails if the camera buffer has not been created yet.
    pub fn new(device: &Device, buffer_state: &BufferState) -> VoxelWorldResult<Self> {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some(CAMERA_BIND_GROUP_LAYOUT),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer_state.get_entire_binding(BufferKey::Camera)?,
            }],
            label: Some(CAMERA_BIND_GROUP),
        });

        Ok(Self {
            camera_bind_group,
            camera_bind_group_layout,
        })
    }

    /// The camera bind group, bound at group 0.
    pub fn camera_bind_group(&self) -> &BindGroup {
        &self.camera_bind_group
    }

    /// Layout of the camera bind group.
    pub fn camera_bind_group_layout(&self) -> &BindGroupLayout {
        &self.camera_bind_group_layout
    }
}

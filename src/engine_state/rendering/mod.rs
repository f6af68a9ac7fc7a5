//! Drawing the voxel world.
//!
//! This module owns the surface and everything drawn into it: the voxel pipeline,
//! the uploaded chunk meshes and the camera projection.

use log::{debug, info};
use pipeline_manager::PipelineManager;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

pub use meshing::MeshManager;

use crate::error::VoxelWorldResult;

use super::{buffer_state::BufferState, camera_state::camera};

mod bind_group_state;
pub mod meshing;
mod pipeline_manager;
mod texture;
mod vertex;

pub use vertex::{ChunkPlacement, Vertex};

/// Manages the surface, the pipeline and the uploaded meshes.
pub struct MeshRendererManager {
    /// Target surface
    pub surface: Surface<'static>,
    /// Current size, format and present mode of the surface
    pub surface_config: SurfaceConfiguration,
    /// Voxel pipeline, bind groups and depth buffer
    pub pipeline_manager: PipelineManager,
    /// Tracks the chunk meshes on the GPU
    pub mesh_manager: MeshManager,
    /// Perspective projection; follows the surface aspect ratio
    pub camera_projection: camera::Projection,
}

impl MeshRendererManager {
    /// Creates the pipeline for `surface`.
    ///
    /// # Errors
    /// Fails if the camera uniform buffer is missing from `buffer_state`.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: &Device,
        buffer_state: &BufferState,
        shader_string: &str,
        camera_projection: camera::Projection,
    ) -> VoxelWorldResult<Self> {
        let pipeline_manager = PipelineManager::new(
            device,
            &surface_config,
            surface_config.format,
            buffer_state,
            shader_string,
        )?;
        info!(
            "Render pipeline ready ({}x{}, {:?})",
            surface_config.width, surface_config.height, surface_config.format
        );

        Ok(Self {
            surface,
            surface_config,
            pipeline_manager,
            mesh_manager: MeshManager::new(),
            camera_projection,
        })
    }

    /// Applies a new window size.
    ///
    /// Updates the surface configuration, camera projection and depth texture. A zero
    /// sized window is ignored until it is restored.
    pub fn resize_surface(&mut self, device: &Device, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            debug!("Ignoring resize to {}x{}", size.width, size.height);
            return;
        }

        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.reconfigure(device);

        self.camera_projection.resize(size.width, size.height);
        self.pipeline_manager.resize(device, &self.surface_config);
        info!("Surface resized to {}x{}", size.width, size.height);
    }

    /// Reapplies the current configuration to the surface.
    pub fn reconfigure(&self, device: &Device) {
        self.surface.configure(device, &self.surface_config);
    }

    /// Draws every uploaded chunk mesh into the next surface texture.
    pub fn render(
        &self,
        device: &Device,
        queue: &Queue,
        buffer_state: &BufferState,
    ) -> Result<(), wgpu::SurfaceError> {
        self.pipeline_manager.render(
            &self.surface,
            device,
            queue,
            buffer_state,
            self.mesh_manager.draw_commands(),
        )
    }
}

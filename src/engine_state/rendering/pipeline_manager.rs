//! Manages the render pipeline and the per-frame render pass.
//!
//! The pipeline manager owns the resources shared by every draw (bind groups and the
//! depth texture) and delegates the voxel draws to the [`MeshingRenderer`].

use wgpu::{Device, Queue, Surface, SurfaceConfiguration, TextureFormat};

use crate::{
    engine_state::{buffer_state::BufferState, rendering::meshing::MeshingRenderer},
    error::VoxelWorldResult,
};

use super::{bind_group_state::BindGroupState, meshing::ChunkDrawCommand, texture};

/// Sky colour behind the voxels.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.53,
    g: 0.71,
    b: 0.92,
    a: 1.0,
};

/// Coordinates the render pass for one frame.
pub struct PipelineManager {
    /// Camera bind group and its layout
    pub bind_group_state: BindGroupState,
    /// Sized to the surface; rebuilt on resize
    pub depth_texture: texture::Texture,
    /// The chunk mesh pipeline
    pub meshing_renderer: MeshingRenderer,
}

impl PipelineManager {
    /// Creates the bind groups, the depth texture and the voxel pipeline.
    ///
    /// # Errors
    /// Fails if the camera uniform buffer is missing from `buffer_state`.
    pub fn new(
        device: &Device,
        config: &SurfaceConfiguration,
        texture_format: TextureFormat,
        buffer_state: &BufferState,
        shader_string: &str,
    ) -> VoxelWorldResult<Self> {
        let bind_group_state = BindGroupState::new(device, buffer_state)?;

        let depth_texture =
            texture::Texture::create_depth_texture(device, config, "DEPTH TEXTURE");

        let meshing_renderer = MeshingRenderer::new(
            device,
            shader_string,
            texture_format,
            &bind_group_state,
            Some(texture::Texture::depth_stencil_state()),
        );

        Ok(Self {
            bind_group_state,
            depth_texture,
            meshing_renderer,
        })
    }

    /// Renders and presents one frame.
    ///
    /// # Errors
    /// Returns the surface error when no frame could be acquired; the caller decides
    /// whether it is recoverable.
    pub fn render(
        &self,
        surface: &Surface,
        device: &Device,
        queue: &Queue,
        buffer_state: &BufferState,
        draw_commands: &[ChunkDrawCommand],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = surface.get_current_texture()?;

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = device.create_command_encoder(&Default::default());
        {
            let depth_stencil_attachment = Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Voxel Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment,
                ..Default::default()
            });

            self.meshing_renderer.render(
                &mut rpass,
                buffer_state,
                &self.bind_group_state,
                draw_commands,
            );
        }

        queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }

    /// Recreates the depth texture at the new surface size.
    pub fn resize(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.depth_texture = texture::Texture::create_depth_texture(device, config, "DEPTH TEXTURE");
    }
}

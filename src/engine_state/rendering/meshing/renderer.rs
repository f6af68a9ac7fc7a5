//! The render pipeline for chunk meshes.
//!
//! Owns the voxel render pipeline and issues one indexed draw per uploaded chunk.
//! Vertex slot 0 carries the chunk's vertices, slot 1 its single placement instance.

use log::warn;
use wgpu::{Device, RenderPass, RenderPipeline, TextureFormat};

use crate::engine_state::{
    buffer_state::BufferState,
    rendering::{
        bind_group_state::BindGroupState,
        vertex::{ChunkPlacement, Vertex},
    },
};

use super::ChunkDrawCommand;

/// Draws voxel meshes.
pub struct MeshingRenderer {
    render_pipeline: RenderPipeline,
}

impl MeshingRenderer {
    /// Creates the voxel render pipeline.
    ///
    /// Triangles are counter-clockwise when seen from outside a voxel, so back faces
    /// are culled.
    pub fn new(
        device: &Device,
        shader_string: &str,
        texture_format: TextureFormat,
        bind_group_state: &BindGroupState,
        depth_stencil: Option<wgpu::DepthStencilState>,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Render Pipeline Layout"),
            bind_group_layouts: &[bind_group_state.camera_bind_group_layout()],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_string.into()),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc(), ChunkPlacement::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: texture_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        Self { render_pipeline }
    }

    /// Records one draw per chunk into the render pass.
    ///
    /// A draw whose buffers are missing is skipped with a warning.
    pub fn render(
        &self,
        render_pass: &mut RenderPass<'_>,
        buffer_state: &BufferState,
        bind_group_state: &BindGroupState,
        draw_commands: &[ChunkDrawCommand],
    ) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, bind_group_state.camera_bind_group(), &[]);

        for draw in draw_commands {
            let (Some(vertices), Some(indices), Some(placement)) = (
                buffer_state.get_buffer(draw.vertex_buffer()),
                buffer_state.get_buffer(draw.index_buffer()),
                buffer_state.get_buffer(draw.placement_buffer()),
            ) else {
                warn!("Missing buffers for chunk {:?}", draw.grid_position);
                continue;
            };

            render_pass.set_vertex_buffer(0, vertices.slice(..));
            render_pass.set_vertex_buffer(1, placement.slice(..));
            render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
    }
}

//! # Graphics Resources Builder
//!
//! Creates the window and the WebGPU resources the engine renders with.
//!
//! The main components are:
//! - `Graphics`: the window, surface, device, queue and shader source
//! - `GraphicsBuilder`: runs the asynchronous bring-up and posts the result back to
//!   the event loop
//! - `MaybeGraphics`: the stages of that bring-up

use std::future::Future;
use std::sync::Arc;

use log::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::{
    dpi::LogicalSize,
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    config::EngineConfig,
    error::{VoxelWorldError, VoxelWorldResult},
};

/// Contains all graphics-related resources required by the application.
pub struct Graphics {
    /// The application window
    pub window: Arc<Window>,
    /// Surface presenting into the window
    pub surface: Surface<'static>,
    /// Current surface configuration
    pub surface_config: SurfaceConfiguration,
    /// GPU device
    pub device: Device,
    /// Command queue of the device
    pub queue: Queue,
    /// WGSL source of the voxel shader
    pub shader_string: String,
}

/// Creates the window and surface, and returns a future that finishes the GPU
/// bring-up.
///
/// # Errors
/// Window or surface creation fail immediately; adapter, device and shader errors
/// surface from the future.
fn create_graphics(
    event_loop: &ActiveEventLoop,
    config: &EngineConfig,
) -> VoxelWorldResult<impl Future<Output = VoxelWorldResult<Graphics>> + 'static> {
    let window_attrs = Window::default_attributes()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height));
    let window = Arc::new(event_loop.create_window(window_attrs)?);

    // The instance is a handle to our GPU
    // Backends::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });

    let surface = instance.create_surface(window.clone())?;
    let shader_path = config.shader_path.clone();

    Ok(async move {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Voxel World Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await?;

        let size = window.inner_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(VoxelWorldError::UnsupportedSurface)?;
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let shader_string =
            std::fs::read_to_string(&shader_path).map_err(|source| VoxelWorldError::Shader {
                path: shader_path.clone(),
                source,
            })?;

        surface.configure(&device, &surface_config);
        Ok(Graphics {
            window,
            surface,
            surface_config,
            device,
            queue,
            shader_string,
        })
    })
}

/// Runs the graphics bring-up and sends the result back to the main thread.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<Graphics>>,
}

/// Represents the possible states of the graphics initialization process.
pub enum MaybeGraphics {
    /// Waiting for the first `resumed` event
    Builder(GraphicsBuilder),

    /// Graphics resources are ready and waiting to be handed to the engine
    Graphics(Graphics),

    /// Graphics resources have been moved into the engine
    Moved,
}

impl GraphicsBuilder {
    /// Creates a new GraphicsBuilder with the specified event loop proxy.
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
        }
    }

    /// Builds the graphics resources and posts them to the event loop.
    ///
    /// Does nothing once the proxy is spent.
    ///
    /// # Errors
    /// Propagates any bring-up failure, and fails if the event loop is gone.
    pub fn build_and_send(
        &mut self,
        event_loop: &ActiveEventLoop,
        config: &EngineConfig,
    ) -> VoxelWorldResult<()> {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // event_loop_proxy is already spent - we already constructed Graphics
            return Ok(());
        };

        let gfx = pollster::block_on(create_graphics(event_loop, config)?)?;
        event_loop_proxy
            .send_event(gfx)
            .map_err(|_| VoxelWorldError::GraphicsUnavailable)
    }
}

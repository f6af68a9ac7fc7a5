//! # Engine State Module
//!
//! The core engine module that owns the world, the camera and the renderer.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `buffer_state` - Registry of GPU buffers
//! * `camera_state` - Camera positioning and movement
//! * `rendering` - Meshing, pipelines and the render pass
//! * `voxels` - Voxel data: blocks, chunks and the world
//!
//! ## Frame Flow
//!
//! 1. The application hands over the frame's processed input
//! 2. Input becomes a [`PlayerAction`], which moves the camera
//! 3. The camera uniform is uploaded and the chunk meshes are drawn
//!
//! Chunk meshes are built once at startup and again on request; the world does not
//! change in between.

use camera_state::{camera, CameraState};
use log::{error, info, warn};
use rendering::{meshing::create_meshes, MeshRendererManager};
use voxels::world::World;
use web_time::Duration;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::{
    application_state::input_state::ProcessedInputState,
    config::EngineConfig,
    error::VoxelWorldResult,
};

pub mod buffer_state;
pub mod camera_state;
pub mod rendering;
pub mod voxels;

/// The main state container for the voxel engine.
pub struct EngineState {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Buffer state for managing GPU buffers
    buffer_state: buffer_state::BufferState,
    /// Manager for mesh rendering operations
    pub render_manager: MeshRendererManager,
    /// The voxel world containing all chunk data
    pub world: World,
    device: Device,
    queue: Queue,
}

impl EngineState {
    /// Creates a new engine state: generates the world, meshes it and uploads the
    /// meshes.
    ///
    /// # Errors
    /// Fails if the render pipeline cannot be built.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shader_string: &str,
        config: &EngineConfig,
    ) -> VoxelWorldResult<Self> {
        let mut buffer_state = buffer_state::BufferState::new();

        let camera_projection = camera::Projection::new(
            surface_config.width,
            surface_config.height,
            cgmath::Deg(config.fov_y_degrees),
            config.z_near,
            config.z_far,
        );

        let camera_state =
            CameraState::new(&device, &mut buffer_state, &camera_projection, config);

        let render_manager = MeshRendererManager::new(
            surface,
            surface_config,
            &device,
            &buffer_state,
            shader_string,
            camera_projection,
        )?;

        let world = World::generate(config.world_extent());

        let mut engine_state = Self {
            camera_state,
            player_actions: PlayerAction::default(),
            buffer_state,
            render_manager,
            world,
            device,
            queue,
        };
        engine_state.rebuild_meshes();
        Ok(engine_state)
    }

    /// Regenerates and re-uploads every chunk mesh.
    pub fn rebuild_meshes(&mut self) {
        let meshes = create_meshes(&self.world);
        self.render_manager.mesh_manager.upload_meshes(
            &self.device,
            &mut self.buffer_state,
            &meshes,
        );
    }

    /// Resizes the rendering surface when the window size changes.
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.render_manager.resize_surface(&self.device, size);
    }

    /// Renders the current frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped; a timeout
    /// only skips the frame.
    ///
    /// # Errors
    /// Returns the surface error when rendering cannot continue.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        match self
            .render_manager
            .render(&self.device, &self.queue, &self.buffer_state)
        {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                info!("Surface lost or outdated, reconfiguring");
                self.render_manager.reconfigure(&self.device);
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory while acquiring a frame");
                Err(wgpu::SurfaceError::OutOfMemory)
            }
            Err(err) => {
                warn!("Skipping frame: {}", err);
                Ok(())
            }
        }
    }

    /// Moves the camera by this frame's actions and uploads the camera uniform.
    pub fn process_input(&mut self, dt: Duration) {
        self.camera_state.intake_actions(&self.player_actions, dt);

        if let Err(err) = self.camera_state.update(
            dt,
            &self.render_manager.camera_projection,
            &self.queue,
            &mut self.buffer_state,
        ) {
            warn!("Camera upload failed: {}", err);
        }

        if self.player_actions.rebuild_meshes {
            info!("Rebuilding chunk meshes");
            self.rebuild_meshes();
        }
    }

    /// Sets the input commands for the engine state.
    pub fn set_input_commands(&mut self, input: &ProcessedInputState) {
        self.player_actions = PlayerAction::from_input(input);
    }
}

/// Represents player actions derived from input.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerAction {
    /// Move along the view direction; movement flags are true while the key is down
    pub move_forward: bool,
    /// Move away from the view direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Move up along world Y
    pub move_up: bool,
    /// Move down along world Y
    pub move_down: bool,

    /// Rotate left; the turn and look flags come from the arrow keys
    pub turn_left: bool,
    /// Rotate right
    pub turn_right: bool,
    /// Pitch up
    pub look_up: bool,
    /// Pitch down
    pub look_down: bool,

    /// Mouse rotation - Some while the left button is down and the mouse moved
    pub rotate_view: Option<(f64, f64)>,

    /// Rebuild every chunk mesh; only set on the frame the key goes down
    pub rebuild_meshes: bool,
}

impl PlayerAction {
    /// Translates a processed input snapshot into player actions.
    pub fn from_input(input: &ProcessedInputState) -> Self {
        let active = |key| input.get_key_state(key).is_active();

        let rotate_view = input.get_mouse_delta().filter(|_| {
            input
                .get_mouse_button_state(MouseButton::Left)
                .is_active()
        });

        PlayerAction {
            move_forward: active(KeyCode::KeyW),
            move_backward: active(KeyCode::KeyS),
            move_left: active(KeyCode::KeyA),
            move_right: active(KeyCode::KeyD),
            move_up: active(KeyCode::Space),
            move_down: active(KeyCode::ShiftLeft),
            turn_left: active(KeyCode::ArrowLeft),
            turn_right: active(KeyCode::ArrowRight),
            look_up: active(KeyCode::ArrowUp),
            look_down: active(KeyCode::ArrowDown),
            rotate_view,
            rebuild_meshes: input.get_key_state(KeyCode::KeyR).is_just_pressed(),
        }
    }
}

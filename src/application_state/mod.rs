//! # Application Lifecycle
//!
//! Drives the winit event loop: brings up the window and GPU on the first resume,
//! then feeds window events to the input manager and the engine, and owns the error
//! that ends the run.

pub mod graphics_resources_builder;
pub mod input_manager;
pub mod input_state;

use std::sync::Arc;

use graphics_resources_builder::{Graphics, GraphicsBuilder, MaybeGraphics};
use input_manager::InputManager;
use log::error;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{config::EngineConfig, engine_state::EngineState, error::VoxelWorldError};

/// Event loop handler for the voxel world.
///
/// It implements `ApplicationHandler` to route window and device events to the
/// engine once graphics are up.
pub struct ApplicationState {
    config: EngineConfig,

    /// The current graphics state
    graphics: MaybeGraphics,

    /// Set once the engine is running
    state: Option<InitializedApplicationState>,

    /// The error that stopped the event loop, if any
    error: Option<VoxelWorldError>,
}

/// Everything that exists once graphics bring-up has finished.
pub struct InitializedApplicationState {
    /// The core engine state
    pub engine_state: EngineState,

    /// The window frames are presented to
    pub window: Arc<Window>,

    /// Keyboard and mouse tracking
    pub input_manager: InputManager,

    /// When `about_to_wait` last ran; frame delta is measured from here
    pub last_wait_time: web_time::Instant,
}

impl ApplicationState {
    /// Creates the handler; graphics are built on the first resume.
    pub fn new(config: EngineConfig, event_loop_proxy: EventLoopProxy<Graphics>) -> Self {
        Self {
            config,
            graphics: MaybeGraphics::Builder(GraphicsBuilder::new(event_loop_proxy)),
            state: None,
            error: None,
        }
    }

    /// Takes the error that stopped the event loop.
    pub fn take_error(&mut self) -> Option<VoxelWorldError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: VoxelWorldError) {
        error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    /// Hands the graphics resources to a new engine state.
    fn initialize_application_state(&mut self, event_loop: &ActiveEventLoop) {
        let MaybeGraphics::Graphics(gfx) =
            std::mem::replace(&mut self.graphics, MaybeGraphics::Moved)
        else {
            return;
        };

        match EngineState::new(
            gfx.surface,
            gfx.surface_config,
            gfx.device,
            gfx.queue,
            &gfx.shader_string,
            &self.config,
        ) {
            Ok(engine_state) => {
                self.state = Some(InitializedApplicationState {
                    engine_state,
                    window: gfx.window,
                    input_manager: InputManager::new(),
                    last_wait_time: web_time::Instant::now(),
                });
            }
            Err(err) => self.fail(event_loop, err),
        }
    }
}

fn is_exit_request(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
                ..
            }
    )
}

impl ApplicationHandler<Graphics> for ApplicationState {
    /// Routes input to the input manager and handles resize, focus loss, redraw and exit.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if is_exit_request(&event) {
            event_loop.exit();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        state.input_manager.intake_input(&event);

        match event {
            WindowEvent::Resized(size) => {
                state.engine_state.resize_surface(size);
            }
            WindowEvent::Focused(false) => {
                state.input_manager.reset_inputs();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = state.engine_state.render() {
                    error!("Rendering stopped: {}", err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    /// Raw mouse motion for mouse look.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Starts the graphics bring-up on the first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let MaybeGraphics::Builder(builder) = &mut self.graphics {
            if let Err(err) = builder.build_and_send(event_loop, &self.config) {
                self.fail(event_loop, err);
            }
        }
    }

    /// Receives the finished graphics resources and starts the engine.
    fn user_event(&mut self, event_loop: &ActiveEventLoop, graphics: Graphics) {
        self.graphics = MaybeGraphics::Graphics(graphics);
        self.initialize_application_state(event_loop);
    }

    /// Called before the event loop goes to sleep: advances input and the camera,
    /// then asks for the next frame.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = web_time::Instant::now();
            let wait_dt = now - state.last_wait_time;

            let processed_input = state.input_manager.get_and_reset_processed_input();
            state.engine_state.set_input_commands(&processed_input);
            state.engine_state.process_input(wait_dt);

            state.last_wait_time = now;
            state.window.request_redraw();
        }
    }
}

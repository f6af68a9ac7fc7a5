#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A small voxel world renderer built with Rust and WGPU.
//!
//! The world is a fixed grid of 16³ chunks filled with the same layered terrain. Each
//! chunk is turned into a culled mesh (only faces touching air are emitted, including
//! faces on the border with a neighbouring chunk) and drawn with a free-flying
//! camera.
//!
//! ## Key Modules
//!
//! * `application_state` - Window lifecycle, graphics bring-up and input
//! * `config` - Engine settings loaded from JSON
//! * `engine_state` - Voxels, meshing, camera and rendering
//! * `error` - The crate's error type
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(err) = voxel_world::run() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```
//!
//! The voxel and meshing layers work without a GPU:
//!
//! ```
//! use cgmath::Vector3;
//! use voxel_world::engine_state::{rendering::meshing::create_meshes, voxels::world::World};
//!
//! let world = World::generate(Vector3::new(2, 1, 2));
//! let meshes = create_meshes(&world);
//! assert_eq!(meshes.len(), 4);
//! ```

use application_state::ApplicationState;
use config::EngineConfig;
use error::VoxelWorldResult;
use log::info;
use winit::event_loop::EventLoop;

pub mod application_state;
pub mod config;
pub mod engine_state;
pub mod error;

/// Starts logging, opens the window and runs the event loop until it exits.
///
/// # Errors
/// Returns the configuration, event loop or graphics error that stopped the
/// application.
pub fn run() -> VoxelWorldResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = EngineConfig::load()?;
    let event_loop = EventLoop::with_user_event().build()?;

    let mut state = ApplicationState::new(config, event_loop.create_proxy());
    event_loop.run_app(&mut state)?;

    match state.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

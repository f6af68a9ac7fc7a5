//! # Camera State Management
//!
//! This module ties the camera to the rest of the engine:
//! - Camera position and orientation tracking
//! - Player input processing for camera control
//! - Upload of the camera uniform to the GPU
//!
//! ## Core Components
//! - `Camera`: position, yaw and pitch with a lazily rebuilt view matrix
//! - `CameraController`: turns player actions into camera movement
//! - `Projection`: manages the camera's projection matrix
//! - `CameraUniform`: GPU representation of camera data for shaders

use web_time::Duration;
use wgpu::{Device, Queue};

use crate::{config::EngineConfig, error::VoxelWorldResult};

use super::{
    buffer_state::{BufferKey, BufferState},
    PlayerAction,
};

pub mod camera;

/// The camera, its controller and its GPU uniform.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// GPU-optimized camera data for shaders
    pub camera_uniform: camera::CameraUniform,
    /// Handles player input and camera movement
    pub camera_controller: camera::CameraController,
}

impl CameraState {
    /// Creates the camera at the configured start position and the camera uniform
    /// buffer.
    pub fn new(
        device: &Device,
        buffer_state: &mut BufferState,
        projection: &camera::Projection,
        config: &EngineConfig,
    ) -> Self {
        let mut camera = camera::Camera::at(config.camera_start);
        let camera_controller = camera::CameraController::new(
            config.camera_speed,
            config.rotation_speed,
            config.mouse_sensitivity,
        );

        let mut camera_uniform = camera::CameraUniform::new();
        camera_uniform.update_view_proj_and_pos(&mut camera, projection);

        buffer_state.create_buffer_init(
            device,
            BufferKey::Camera,
            bytemuck::cast_slice(&[camera_uniform]),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        CameraState {
            camera,
            camera_uniform,
            camera_controller,
        }
    }

    /// Processes player input actions and updates the camera controller state.
    pub fn intake_actions(&mut self, actions: &PlayerAction, dt: Duration) {
        self.camera_controller.intake_actions(actions, dt);
    }

    /// Applies pending movement and uploads the camera uniform.
    ///
    /// Called once per frame; the projection may have changed on resize even when
    /// the camera did not move.
    pub fn update(
        &mut self,
        dt: Duration,
        projection: &camera::Projection,
        queue: &Queue,
        buffer_state: &mut BufferState,
    ) -> VoxelWorldResult<()> {
        self.camera_controller.update_camera(&mut self.camera, dt);
        self.camera_uniform
            .update_view_proj_and_pos(&mut self.camera, projection);
        buffer_state.write_buffer(
            queue,
            BufferKey::Camera,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        )
    }
}

//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera position and orientation with a lazily rebuilt view matrix
//! - Projection matrix handling
//! - Camera controller for input processing
//! - GPU uniform buffer layout
//!
//! ## Key Components
//! - `Camera`: position, yaw and pitch in degrees, and the cached view matrix
//! - `Projection`: perspective projection settings
//! - `CameraController`: turns player actions into camera movement
//! - `CameraUniform`: packed data structure for GPU shaders

use cgmath::*;
use web_time::Duration;

use crate::engine_state::PlayerAction;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// NDC depth in WGPU ranges from 0 to 1 rather than -1 to 1, so this matrix:
/// 1. Scales the Z coordinate from [-1, 1] to [-0.5, 0.5]
/// 2. Translates the Z coordinate from [-0.5, 0.5] to [0, 1]
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pitch is kept inside this range so the view direction never becomes parallel to
/// the up vector.
pub const PITCH_LIMIT: Deg<f32> = Deg(89.0);

/// The cached view matrix of a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMatrixState {
    /// The matrix matches the current position and orientation.
    Clean(Matrix4<f32>),
    /// Position or orientation changed since the matrix was last built.
    Dirty,
}

/// A first-person camera in 3D space.
///
/// Every setter marks the cached view matrix dirty; [`Camera::view_matrix`]
/// rebuilds it before returning, so a stale matrix is never observed.
#[derive(Debug, Clone)]
pub struct Camera {
    /// The camera's position in world space
    position: Point3<f32>,
    /// Horizontal rotation around the Y axis
    yaw: Deg<f32>,
    /// Vertical rotation around the camera's right axis
    pitch: Deg<f32>,
    view_matrix: ViewMatrixState,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a camera at the origin with yaw -90 and pitch 0, looking down -Z.
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            yaw: Deg(-90.0),
            pitch: Deg(0.0),
            view_matrix: ViewMatrixState::Dirty,
        }
    }

    /// Creates a camera with the given position and the default orientation.
    pub fn at<V: Into<Point3<f32>>>(position: V) -> Self {
        let mut camera = Self::new();
        camera.set_position(position);
        camera
    }

    /// The normalised view direction derived from yaw and pitch.
    pub fn direction(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).sin_cos();
        let (pitch_sin, pitch_cos) = Rad::from(self.pitch).sin_cos();
        Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    /// Returns the view matrix, rebuilding it first if anything changed.
    pub fn view_matrix(&mut self) -> Matrix4<f32> {
        match self.view_matrix {
            ViewMatrixState::Clean(matrix) => matrix,
            ViewMatrixState::Dirty => {
                let matrix = self.calc_matrix();
                self.view_matrix = ViewMatrixState::Clean(matrix);
                matrix
            }
        }
    }

    /// The view matrix in column-major order, ready for upload.
    pub fn view_matrix_array(&mut self) -> [[f32; 4]; 4] {
        self.view_matrix().into()
    }

    /// The current cache state.
    pub fn view_matrix_state(&self) -> ViewMatrixState {
        self.view_matrix
    }

    fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            self.position,
            self.position + self.direction(),
            Vector3::unit_y(),
        )
    }

    fn invalidate(&mut self) {
        self.view_matrix = ViewMatrixState::Dirty;
    }

    /// The camera's position in world space.
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// The position as an array, ready for upload.
    pub fn position_array(&self) -> [f32; 3] {
        self.position.into()
    }

    /// X component of the position.
    pub fn position_x(&self) -> f32 {
        self.position.x
    }

    /// Y component of the position.
    pub fn position_y(&self) -> f32 {
        self.position.y
    }

    /// Z component of the position.
    pub fn position_z(&self) -> f32 {
        self.position.z
    }

    /// Horizontal rotation; -90 looks down -Z.
    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    /// Vertical rotation.
    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    /// Moves the camera to `position`.
    pub fn set_position<V: Into<Point3<f32>>>(&mut self, position: V) {
        self.position = position.into();
        self.invalidate();
    }

    /// Sets the X component of the position.
    pub fn set_position_x(&mut self, x: f32) {
        self.position.x = x;
        self.invalidate();
    }

    /// Sets the Y component of the position.
    pub fn set_position_y(&mut self, y: f32) {
        self.position.y = y;
        self.invalidate();
    }

    /// Sets the Z component of the position.
    pub fn set_position_z(&mut self, z: f32) {
        self.position.z = z;
        self.invalidate();
    }

    /// Sets the horizontal rotation.
    pub fn set_yaw<Y: Into<Deg<f32>>>(&mut self, yaw: Y) {
        self.yaw = yaw.into();
        self.invalidate();
    }

    /// Sets the vertical rotation. Not clamped here; see [`CameraController`].
    pub fn set_pitch<P: Into<Deg<f32>>>(&mut self, pitch: P) {
        self.pitch = pitch.into();
        self.invalidate();
    }
}

/// Represents a camera's projection matrix and related parameters.
///
/// This handles the perspective projection used to render the 3D scene.
#[derive(Debug)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: Self::aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = Self::aspect_ratio(width, height);
    }

    fn aspect_ratio(width: u32, height: u32) -> f32 {
        // A minimised window reports a zero height.
        width.max(1) as f32 / height.max(1) as f32
    }

    /// Calculates the projection matrix, including the OpenGL to WGPU depth remap.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Handles camera movement and rotation based on user input.
///
/// Actions are accumulated with [`CameraController::intake_actions`] and applied once
/// per frame by [`CameraController::update_camera`], which then resets them.
#[derive(Debug)]
pub struct CameraController {
    // Movement amounts (0 or 1 per direction)
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,

    // Rotation in degrees, already scaled
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    /// Units per second
    speed: f32,
    /// Degrees per second for the arrow keys
    rotation_speed: f32,
    /// Degrees per pixel of mouse motion
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new camera controller.
    ///
    /// # Arguments
    /// * `speed` - Movement speed in units per second
    /// * `rotation_speed` - Arrow key rotation in degrees per second
    /// * `sensitivity` - Mouse look in degrees per pixel
    pub fn new(speed: f32, rotation_speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            rotation_speed,
            sensitivity,
        }
    }

    /// Processes player actions and updates controller state accordingly.
    pub fn intake_actions(&mut self, actions: &PlayerAction, dt: Duration) {
        let dt = dt.as_secs_f32();

        self.amount_forward = actions.move_forward as u8 as f32;
        self.amount_backward = actions.move_backward as u8 as f32;
        self.amount_left = actions.move_left as u8 as f32;
        self.amount_right = actions.move_right as u8 as f32;
        self.amount_up = actions.move_up as u8 as f32;
        self.amount_down = actions.move_down as u8 as f32;

        let turn = self.rotation_speed * dt;
        self.rotate_horizontal = (actions.turn_right as u8 as f32 - actions.turn_left as u8 as f32) * turn;
        self.rotate_vertical = (actions.look_up as u8 as f32 - actions.look_down as u8 as f32) * turn;

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal += delta_x as f32 * self.sensitivity;
            self.rotate_vertical -= delta_y as f32 * self.sensitivity;
        }
    }

    /// Checks if there are any pending updates that would affect the camera.
    pub fn has_updates(&self) -> bool {
        self.amount_forward != 0.0
            || self.amount_backward != 0.0
            || self.amount_left != 0.0
            || self.amount_right != 0.0
            || self.amount_up != 0.0
            || self.amount_down != 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    /// Applies pending movement and rotation to the camera through its setters, then
    /// resets the controller.
    ///
    /// Movement follows the yaw-derived forward and right vectors on the horizontal
    /// plane; up and down move along world Y. Pitch is clamped to [`PITCH_LIMIT`].
    pub fn update_camera(&mut self, camera: &mut Camera, dt: Duration) {
        if !self.has_updates() {
            return;
        }
        let dt = dt.as_secs_f32();

        let (yaw_sin, yaw_cos) = Rad::from(camera.yaw()).sin_cos();
        let forward = Vector3::new(yaw_cos, 0.0, yaw_sin);
        let right = Vector3::new(-yaw_sin, 0.0, yaw_cos);

        let step = self.speed * dt;
        let mut position = camera.position();
        position += forward * (self.amount_forward - self.amount_backward) * step;
        position += right * (self.amount_right - self.amount_left) * step;
        position.y += (self.amount_up - self.amount_down) * step;
        camera.set_position(position);

        if self.rotate_horizontal != 0.0 {
            camera.set_yaw(camera.yaw() + Deg(self.rotate_horizontal));
        }
        if self.rotate_vertical != 0.0 {
            let pitch = (camera.pitch() + Deg(self.rotate_vertical)).0;
            camera.set_pitch(Deg(pitch.clamp(-PITCH_LIMIT.0, PITCH_LIMIT.0)));
        }

        self.reset();
    }

    fn reset(&mut self) {
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
        self.amount_up = 0.0;
        self.amount_down = 0.0;
        self.amount_left = 0.0;
        self.amount_right = 0.0;
        self.amount_forward = 0.0;
        self.amount_backward = 0.0;
    }
}

/// GPU-friendly representation of camera data for shaders.
///
/// The layout matches the `CameraUniform` struct in the WGSL shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // We can't use cgmath with bytemuck directly so we'll have to convert the Matrix4 into a 4x4 f32 array
    view_proj: [[f32; 4]; 4],
    position: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Creates a new camera uniform with an identity matrix and zero position.
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
            position: [0.0; 4],
        }
    }

    /// Updates the view-projection matrix and position from the camera.
    pub fn update_view_proj_and_pos(&mut self, camera: &mut Camera, projection: &Projection) {
        let view_proj = projection.calc_matrix() * camera.view_matrix();
        self.view_proj = view_proj.into();
        let [x, y, z] = camera.position_array();
        self.position = [x, y, z, 1.0];
    }

    /// The packed view-projection matrix.
    pub fn view_proj(&self) -> [[f32; 4]; 4] {
        self.view_proj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn initial_camera_looks_down_negative_z() {
        let camera = Camera::new();
        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(camera.yaw(), Deg(-90.0));
        assert_eq!(camera.pitch(), Deg(0.0));
        assert_close(camera.direction(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn initial_view_matrix_maps_forward_to_negative_z() {
        let mut camera = Camera::new();
        let view = camera.view_matrix();
        let ahead = view * Vector4::new(0.0, 0.0, -5.0, 1.0);
        assert!((ahead.z + 5.0).abs() < 1e-5);
        assert!(ahead.x.abs() < 1e-5);
    }

    #[test]
    fn reads_without_mutation_are_identical() {
        let mut camera = Camera::at([1.0, 2.0, 3.0]);
        assert_eq!(camera.view_matrix_state(), ViewMatrixState::Dirty);

        let first = camera.view_matrix_array();
        let second = camera.view_matrix_array();
        assert_eq!(first, second);
        assert!(matches!(camera.view_matrix_state(), ViewMatrixState::Clean(_)));
    }

    #[test]
    fn yaw_change_invalidates() {
        let mut camera = Camera::new();
        let before = camera.view_matrix();

        camera.set_yaw(Deg(0.0));
        assert_eq!(camera.view_matrix_state(), ViewMatrixState::Dirty);
        assert_ne!(camera.view_matrix(), before);
        assert_close(camera.direction(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn every_setter_invalidates() {
        let setters: [fn(&mut Camera); 6] = [
            |c| c.set_position_x(1.0),
            |c| c.set_position_y(1.0),
            |c| c.set_position_z(1.0),
            |c| c.set_position([4.0, 5.0, 6.0]),
            |c| c.set_yaw(Deg(10.0)),
            |c| c.set_pitch(Deg(10.0)),
        ];

        for setter in setters {
            let mut camera = Camera::new();
            let before = camera.view_matrix();
            setter(&mut camera);
            assert_eq!(camera.view_matrix_state(), ViewMatrixState::Dirty);
            assert_ne!(camera.view_matrix(), before);
        }
    }

    #[test]
    fn position_components() {
        let mut camera = Camera::new();
        camera.set_position_x(1.5);
        camera.set_position_y(-2.0);
        camera.set_position_z(3.25);

        assert_eq!(camera.position_x(), 1.5);
        assert_eq!(camera.position_y(), -2.0);
        assert_eq!(camera.position_z(), 3.25);
        assert_eq!(camera.position_array(), [1.5, -2.0, 3.25]);
    }

    #[test]
    fn controller_moves_along_view_yaw() {
        let mut camera = Camera::new();
        let mut controller = CameraController::new(4.0, 90.0, 0.1);
        let actions = PlayerAction {
            move_forward: true,
            ..Default::default()
        };

        controller.intake_actions(&actions, Duration::from_millis(500));
        controller.update_camera(&mut camera, Duration::from_millis(500));

        assert_close(camera.position().to_vec(), Vector3::new(0.0, 0.0, -2.0));
        assert!(!controller.has_updates());
    }

    #[test]
    fn controller_clamps_pitch() {
        let mut camera = Camera::new();
        let mut controller = CameraController::new(4.0, 90.0, 1.0);
        let actions = PlayerAction {
            rotate_view: Some((0.0, -500.0)),
            ..Default::default()
        };

        controller.intake_actions(&actions, Duration::from_millis(16));
        controller.update_camera(&mut camera, Duration::from_millis(16));

        assert_eq!(camera.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn idle_controller_keeps_cache() {
        let mut camera = Camera::new();
        camera.view_matrix();
        let mut controller = CameraController::new(4.0, 90.0, 0.1);

        controller.intake_actions(&PlayerAction::default(), Duration::from_millis(16));
        controller.update_camera(&mut camera, Duration::from_millis(16));

        assert!(matches!(camera.view_matrix_state(), ViewMatrixState::Clean(_)));
    }

    #[test]
    fn uniform_carries_position() {
        let mut camera = Camera::at([1.0, 2.0, 3.0]);
        let projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
        let mut uniform = CameraUniform::new();

        uniform.update_view_proj_and_pos(&mut camera, &projection);

        assert_eq!(uniform.position, [1.0, 2.0, 3.0, 1.0]);
        assert_ne!(uniform.view_proj(), CameraUniform::new().view_proj());
    }
}

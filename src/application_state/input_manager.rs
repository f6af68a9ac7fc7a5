//! # Input Manager
//!
//! Owns the raw keyboard and mouse state for the window and turns it into a
//! [`ProcessedInputState`] once per frame. Nothing here is global: the application
//! owns one manager and hands each snapshot to the engine.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

/// Keys the engine reacts to.
pub const KEY_CODES: [KeyCode; 11] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::KeyR,
];

const MOUSE_BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Manages the state of all input devices and processes input events.
#[derive(Debug)]
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    mouse_inputs: MouseInput,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every tracked key and button released.
    pub fn new() -> Self {
        let released_keys: HashMap<KeyCode, bool> =
            KEY_CODES.iter().map(|&key| (key, false)).collect();
        let released_buttons: HashMap<MouseButton, bool> =
            MOUSE_BUTTONS.iter().map(|&button| (button, false)).collect();

        Self {
            keyboard_inputs_old: released_keys.clone(),
            keyboard_inputs_new: released_keys,
            mouse_inputs: MouseInput {
                mouse_button_inputs_old: released_buttons.clone(),
                mouse_button_inputs_new: released_buttons,
                mouse_delta: None,
            },
        }
    }

    /// Processes a window event and updates internal input state.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.record_key(*key, *state == ElementState::Pressed),
            WindowEvent::MouseInput { button, state, .. } => {
                self.record_mouse_button(*button, *state == ElementState::Pressed)
            }
            _ => {}
        }
    }

    /// Records a key going down or up. Untracked keys are ignored.
    pub fn record_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Records a mouse button going down or up. Untracked buttons are ignored.
    pub fn record_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = pressed;
        }
    }

    /// Accumulates raw mouse motion until the next snapshot.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Builds the transition snapshot from the old and new raw states.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
        }
    }

    /// Returns this frame's snapshot and advances the state to the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.move_old_states();
        processed_input
    }

    /// Releases every key and button, e.g. when the window loses focus.
    pub fn reset_inputs(&mut self) {
        self.keyboard_inputs_new.values_mut().for_each(|s| *s = false);
        self.mouse_inputs
            .mouse_button_inputs_new
            .values_mut()
            .for_each(|s| *s = false);
        self.mouse_inputs.mouse_delta = None;
    }

    fn move_old_states(&mut self) {
        self.keyboard_inputs_old = self.keyboard_inputs_new.clone();
        self.mouse_inputs.mouse_button_inputs_old = self.mouse_inputs.mouse_button_inputs_new.clone();
        self.mouse_inputs.mouse_delta = None;
    }
}

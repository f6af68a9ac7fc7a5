//! # Input State
//!
//! Per-frame snapshots of keyboard and mouse input.

use std::collections::HashMap;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Frame-to-frame state of a key or mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Up on both frames
    #[default]
    NotPressed,
    /// Went down this frame
    Pressed,
    /// Down on both frames
    Held,
    /// Went up this frame
    Released,
}

impl RawInputState {
    /// True while down, whether new or held.
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// True only on the frame the input went down.
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Derives the transition from the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A per-frame snapshot of input transitions.
///
/// This is what the engine consumes; it never sees window events directly.
#[derive(Debug, Clone, Default)]
pub struct ProcessedInputState {
    /// Transition state of every tracked keyboard key
    pub keyboard_states: HashMap<KeyCode, RawInputState>,

    /// Transition state of every tracked mouse button
    pub mouse_button_states: HashMap<MouseButton, RawInputState>,

    /// Mouse movement accumulated since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of a keyboard key; untracked keys are never pressed
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// State of `button` for this frame.
    pub fn get_mouse_button_state(&self, button: MouseButton) -> RawInputState {
        self.mouse_button_states
            .get(&button)
            .copied()
            .unwrap_or_default()
    }

    /// Accumulated mouse motion, if the mouse moved at all.
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

/// Tracks the state of mouse buttons and movement.
#[derive(Debug, Default)]
pub struct MouseInput {
    /// Mouse buttons as of the previous frame
    pub mouse_button_inputs_old: HashMap<MouseButton, bool>,
    /// Mouse buttons as of this frame
    pub mouse_button_inputs_new: HashMap<MouseButton, bool>,

    /// Summed (x, y) motion since the last snapshot
    pub mouse_delta: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert_eq!(
            RawInputState::from_raw_states(false, false),
            RawInputState::NotPressed
        );
        assert!(RawInputState::Held.is_active());
        assert!(!RawInputState::Released.is_active());
    }

    #[test]
    fn untracked_key_is_not_pressed() {
        let state = ProcessedInputState::default();
        assert_eq!(state.get_key_state(KeyCode::KeyQ), RawInputState::NotPressed);
        assert_eq!(
            state.get_mouse_button_state(MouseButton::Left),
            RawInputState::NotPressed
        );
    }
}

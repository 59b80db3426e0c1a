//! Keyboard input
//!
//! Key events only record what is held and latch one-shot presses. The frame
//! callback samples a `TickInput` once per frame, so the simulation never sees
//! raw events.

use std::collections::HashSet;

use crate::sim::{Command, TickInput};

/// What a physical key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Shoot,
    Dash,
    Command(Command),
    ToggleFullscreen,
    ToggleIdle,
}

/// Discrete actions the host must handle immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Command(Command),
    ToggleFullscreen,
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for(code: &str) -> Option<KeyAction> {
    let action = match code {
        "ArrowUp" | "KeyW" => KeyAction::Up,
        "ArrowDown" | "KeyS" => KeyAction::Down,
        "ArrowLeft" | "KeyA" => KeyAction::Left,
        "ArrowRight" | "KeyD" => KeyAction::Right,
        "Space" => KeyAction::Shoot,
        "ShiftLeft" | "ShiftRight" | "KeyX" => KeyAction::Dash,
        "Escape" | "KeyP" => KeyAction::Command(Command::TogglePause),
        "Enter" => KeyAction::Command(Command::Start),
        "KeyR" => KeyAction::Command(Command::Restart),
        "KeyQ" => KeyAction::Command(Command::QuitToMenu),
        "KeyF" => KeyAction::ToggleFullscreen,
        "KeyI" => KeyAction::ToggleIdle,
        _ => return None,
    };
    Some(action)
}

/// Held keys and latched presses
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
    shoot_pressed: bool,
    dash_pressed: bool,
    idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat events are ignored for one-shot
    /// actions. Returns an action the host must handle now, if any.
    pub fn key_down(&mut self, code: &str) -> Option<HostAction> {
        let action = action_for(code)?;
        let repeat = !self.held.insert(code.to_string());
        if repeat {
            return None;
        }

        match action {
            KeyAction::Shoot => self.shoot_pressed = true,
            KeyAction::Dash => self.dash_pressed = true,
            KeyAction::Command(command) => return Some(HostAction::Command(command)),
            KeyAction::ToggleFullscreen => return Some(HostAction::ToggleFullscreen),
            KeyAction::ToggleIdle => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
            }
            KeyAction::Up | KeyAction::Down | KeyAction::Left | KeyAction::Right => {}
        }
        None
    }

    /// Record a key release
    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Forget held keys (window blur: key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.shoot_pressed = false;
        self.dash_pressed = false;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    fn is_held(&self, wanted: KeyAction) -> bool {
        self.held.iter().any(|code| action_for(code) == Some(wanted))
    }

    /// Snapshot for this frame; clears one-shot latches
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            up: self.is_held(KeyAction::Up),
            down: self.is_held(KeyAction::Down),
            left: self.is_held(KeyAction::Left),
            right: self.is_held(KeyAction::Right),
            shoot: self.shoot_pressed || self.is_held(KeyAction::Shoot),
            dash: self.dash_pressed,
            idle_mode: self.idle_mode,
        };
        self.shoot_pressed = false;
        self.dash_pressed = false;
        input
    }
}

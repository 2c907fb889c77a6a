//! Keyboard and on-screen button input
//!
//! Key events arrive from the host as DOM `KeyboardEvent.code` strings,
//! touch buttons as press/release of an `Action`. Both fold into the same
//! held-button state. The simulation reads a `TickInput` snapshot once per
//! fixed step.

use crate::sim::TickInput;

/// Game actions the keyboard and touch buttons can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];

    /// CSS selector of the on-screen button bound to this action
    pub fn button_selector(self) -> &'static str {
        match self {
            Action::MoveLeft => ".btn.left",
            Action::MoveRight => ".btn.right",
            Action::Jump => ".btn.jump",
        }
    }

    /// Map a `KeyboardEvent.code` to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Action::MoveRight),
            "ArrowUp" | "KeyW" | "Space" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Held state of every action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the key was mapped, so the host can suppress scrolling
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.set(code, false)
    }

    /// Hold `action` (touch or mouse down on its button)
    pub fn press(&mut self, action: Action) {
        self.set_action(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set_action(action, false);
    }

    pub fn set_action(&mut self, action: Action, down: bool) {
        match action {
            Action::MoveLeft => self.left = down,
            Action::MoveRight => self.right = down,
            Action::Jump => self.jump = down,
        }
    }

    /// Release everything (focus lost)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::Jump => self.jump,
        }
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }

    fn set(&mut self, code: &str, down: bool) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        self.set_action(action, down);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_code("ArrowLeft"), Some(Action::MoveLeft));
        assert_eq!(Action::from_code("KeyA"), Some(Action::MoveLeft));
        assert_eq!(Action::from_code("KeyD"), Some(Action::MoveRight));
        assert_eq!(Action::from_code("Space"), Some(Action::Jump));
        assert_eq!(Action::from_code("KeyW"), Some(Action::Jump));
        assert_eq!(Action::from_code("KeyQ"), None);
    }

    #[test]
    fn test_hold_and_release() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowRight"));
        assert!(input.key_down("Space"));
        assert!(input.is_down(Action::MoveRight));
        assert_eq!(
            input.snapshot(),
            TickInput {
                left: false,
                right: true,
                jump: true
            }
        );

        assert!(input.key_up("Space"));
        assert!(!input.snapshot().jump);
        assert!(input.snapshot().right);
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("Escape"));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_clear_releases_all() {
        let mut input = InputState::new();
        input.key_down("KeyA");
        input.key_down("ArrowUp");
        input.clear();
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_button_press_and_release() {
        let mut input = InputState::new();
        input.press(Action::MoveLeft);
        input.press(Action::Jump);
        assert_eq!(
            input.snapshot(),
            TickInput {
                left: true,
                right: false,
                jump: true
            }
        );

        input.release(Action::Jump);
        assert!(input.is_down(Action::MoveLeft));
        assert!(!input.is_down(Action::Jump));
    }

    #[test]
    fn test_button_and_key_share_state() {
        let mut input = InputState::new();
        input.press(Action::MoveRight);
        // Releasing the key releases the touch hold too
        input.key_up("ArrowRight");
        assert!(!input.snapshot().right);
    }

    #[test]
    fn test_every_action_has_a_button() {
        let selectors: Vec<_> = Action::ALL.iter().map(|a| a.button_selector()).collect();
        assert_eq!(selectors, [".btn.left", ".btn.right", ".btn.jump"]);
    }
}

use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::vector::Vec2f;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveAna,
    MoveKata,
    ScaleUp,
    ScaleDown,
    ConstantUp,
    ConstantDown,
    MultiplierUp,
    MultiplierDown,
    CycleMode,
    SelectPrevious,
    SelectNext,
}

impl Button {
    pub const COUNT: usize = 17;

    pub const ALL: [Button; Button::COUNT] = [
        Button::MoveForward,
        Button::MoveBack,
        Button::MoveLeft,
        Button::MoveRight,
        Button::MoveUp,
        Button::MoveDown,
        Button::MoveAna,
        Button::MoveKata,
        Button::ScaleUp,
        Button::ScaleDown,
        Button::ConstantUp,
        Button::ConstantDown,
        Button::MultiplierUp,
        Button::MultiplierDown,
        Button::CycleMode,
        Button::SelectPrevious,
        Button::SelectNext,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn from_key_code(code: KeyCode) -> Option<Button> {
        let button = match code {
            KeyCode::KeyW => Button::MoveForward,
            KeyCode::KeyS => Button::MoveBack,
            KeyCode::KeyA => Button::MoveLeft,
            KeyCode::KeyD => Button::MoveRight,
            KeyCode::KeyE => Button::MoveUp,
            KeyCode::KeyQ => Button::MoveDown,
            KeyCode::KeyR => Button::MoveAna,
            KeyCode::KeyF => Button::MoveKata,
            KeyCode::KeyT => Button::ScaleUp,
            KeyCode::KeyG => Button::ScaleDown,
            KeyCode::KeyY => Button::ConstantUp,
            KeyCode::KeyH => Button::ConstantDown,
            KeyCode::KeyU => Button::MultiplierUp,
            KeyCode::KeyJ => Button::MultiplierDown,
            KeyCode::Tab => Button::CycleMode,
            KeyCode::BracketLeft => Button::SelectPrevious,
            KeyCode::BracketRight => Button::SelectNext,
            _ => return None,
        };
        Some(button)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub held: bool,
    pub pressed: bool,
    pub released: bool,
}

/// Input gathered since the previous tick.
///
/// `pressed`/`released` flags, the pointer delta and the scroll flags are
/// transient: the owner of the event loop calls [`Input::end_tick`] once after
/// every simulation step.
#[derive(Clone, Debug, Default)]
pub struct Input {
    pub pointer_delta: Vec2f,
    pub scroll_up: bool,
    pub scroll_down: bool,
    buttons: [ButtonState; Button::COUNT],
    escape_pressed: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button(&self, button: Button) -> ButtonState {
        self.buttons[button.index()]
    }

    pub fn held(&self, button: Button) -> bool {
        self.buttons[button.index()].held
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.buttons[button.index()].pressed
    }

    pub fn released(&self, button: Button) -> bool {
        self.buttons[button.index()].released
    }

    pub fn press(&mut self, button: Button) {
        let state = &mut self.buttons[button.index()];
        state.held = true;
        state.pressed = true;
    }

    pub fn release(&mut self, button: Button) {
        let state = &mut self.buttons[button.index()];
        state.held = false;
        state.released = true;
    }

    pub fn end_tick(&mut self) {
        for state in self.buttons.iter_mut() {
            state.pressed = false;
            state.released = false;
        }
        self.pointer_delta = Vec2f::ZERO;
        self.scroll_up = false;
        self.scroll_down = false;
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;
        if code == KeyCode::Escape {
            if pressed && !event.repeat {
                self.escape_pressed = true;
            }
            return;
        }
        let Some(button) = Button::from_key_code(code) else {
            return;
        };
        if pressed {
            // Auto-repeat must not re-trigger edge-sensitive buttons.
            if !event.repeat {
                self.press(button);
            }
        } else {
            self.release(button);
        }
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32,
        };
        if delta_y > 0.0 {
            self.scroll_up = true;
        } else if delta_y < 0.0 {
            self.scroll_down = true;
        }
    }

    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.pointer_delta.x += delta.0 as f32;
        self.pointer_delta.y += delta.1 as f32;
    }

    pub fn take_escape(&mut self) -> bool {
        let v = self.escape_pressed;
        self.escape_pressed = false;
        v
    }

    /// Forgets held state, e.g. after the window loses focus.
    pub fn release_all(&mut self) {
        for button in Button::ALL {
            if self.held(button) {
                self.release(button);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_table_matches_discriminants() {
        for (i, button) in Button::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn transient_flags_clear_once_per_tick() {
        let mut input = Input::new();
        input.press(Button::MoveLeft);
        input.handle_mouse_motion((3.0, -2.0));
        input.handle_mouse_motion((1.0, 1.0));
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));

        assert!(input.pressed(Button::MoveLeft));
        assert!(input.held(Button::MoveLeft));
        assert_eq!(input.pointer_delta, Vec2f::new(4.0, -1.0));
        assert!(input.scroll_up);
        assert!(!input.scroll_down);

        input.end_tick();
        assert!(!input.pressed(Button::MoveLeft));
        assert!(input.held(Button::MoveLeft));
        assert_eq!(input.pointer_delta, Vec2f::ZERO);
        assert!(!input.scroll_up);

        input.release(Button::MoveLeft);
        assert_eq!(
            input.button(Button::MoveLeft),
            ButtonState { held: false, pressed: false, released: true }
        );
        input.end_tick();
        assert_eq!(input.button(Button::MoveLeft), ButtonState::default());
    }

    #[test]
    fn key_bindings_cover_every_button() {
        let codes = [
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::KeyE,
            KeyCode::KeyQ,
            KeyCode::KeyR,
            KeyCode::KeyF,
            KeyCode::KeyT,
            KeyCode::KeyG,
            KeyCode::KeyY,
            KeyCode::KeyH,
            KeyCode::KeyU,
            KeyCode::KeyJ,
            KeyCode::Tab,
            KeyCode::BracketLeft,
            KeyCode::BracketRight,
        ];
        let mapped: Vec<Button> = codes.iter().filter_map(|c| Button::from_key_code(*c)).collect();
        assert_eq!(mapped, Button::ALL.to_vec());
        assert_eq!(Button::from_key_code(KeyCode::KeyZ), None);
    }

    #[test]
    fn release_all_drops_held_buttons() {
        let mut input = Input::new();
        input.press(Button::ScaleUp);
        input.press(Button::MoveAna);
        input.end_tick();
        input.release_all();
        assert!(!input.held(Button::ScaleUp));
        assert!(input.released(Button::MoveAna));
    }
}

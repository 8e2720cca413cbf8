use super::{ModeBehavior, ParameterBlock};
use crate::input::{Button, Input};
use crate::vector::Vec3f;

/// Largest cell coordinate on each axis; cells run `0..=GRID_MAX`.
const GRID_MAX: f32 = 3.0;

fn step_up(v: f32) -> f32 {
    if v >= GRID_MAX {
        0.0
    } else {
        v + 1.0
    }
}

fn step_down(v: f32) -> f32 {
    if v <= 0.0 {
        GRID_MAX
    } else {
        v - 1.0
    }
}

/// Cursor over a 4x4x4 board. Coordinates are whole numbers stored as floats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridGameParams {
    pub position: Vec3f,
}

impl ModeBehavior for GridGameParams {
    const FIELD_COUNT: usize = 3;

    fn update(&mut self, input: &Input, _dt: f32) {
        let p = &mut self.position;
        if input.pressed(Button::MoveBack) {
            p.z = step_up(p.z);
        }
        if input.pressed(Button::MoveRight) {
            p.x = step_up(p.x);
        }
        if input.pressed(Button::MoveForward) {
            p.z = step_down(p.z);
        }
        if input.pressed(Button::MoveLeft) {
            p.x = step_down(p.x);
        }
        if input.pressed(Button::MoveUp) {
            p.y = step_up(p.y);
        }
        if input.pressed(Button::MoveDown) {
            p.y = step_down(p.y);
        }
    }

    fn pack(&self, block: &mut ParameterBlock) {
        block.write_fields(&self.position.to_array());
    }

    fn hud_lines(&self) -> Vec<String> {
        let p = self.position;
        vec![format!("Cell = ({}, {}, {})", p.x as i32, p.y as i32, p.z as i32)]
    }
}

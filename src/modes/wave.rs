use super::{ModeBehavior, ParameterBlock};
use crate::input::{Button, Input};
use crate::vector::Vec4f;

const POSITION_STEP: f32 = 0.1;
const W_STEP: f32 = 0.05;
const SCALAR_STEP: f32 = 0.05;

/// Sine-wave field sampled at a 4D position. None of the values are bounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    pub position: Vec4f,
    pub scale: f32,
    pub constant: f32,
    pub multiplier: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        WaveParams {
            position: Vec4f::ZERO,
            scale: 1.0,
            constant: 0.0,
            multiplier: 1.0,
        }
    }
}

fn axis(input: &Input, up: Button, down: Button) -> f32 {
    (input.held(up) as i32 - input.held(down) as i32) as f32
}

impl ModeBehavior for WaveParams {
    const FIELD_COUNT: usize = 7;

    fn update(&mut self, input: &Input, _dt: f32) {
        self.position.x += axis(input, Button::MoveLeft, Button::MoveRight) * POSITION_STEP;
        self.position.y += axis(input, Button::MoveUp, Button::MoveDown) * POSITION_STEP;
        self.position.z += axis(input, Button::MoveForward, Button::MoveBack) * POSITION_STEP;
        self.position.w += axis(input, Button::MoveAna, Button::MoveKata) * W_STEP;

        self.scale += axis(input, Button::ScaleUp, Button::ScaleDown) * SCALAR_STEP;
        self.constant += axis(input, Button::ConstantUp, Button::ConstantDown) * SCALAR_STEP;
        self.multiplier += axis(input, Button::MultiplierUp, Button::MultiplierDown) * SCALAR_STEP;
    }

    fn pack(&self, block: &mut ParameterBlock) {
        let [x, y, z, w] = self.position.to_array();
        block.write_fields(&[x, y, z, w, self.scale, self.constant, self.multiplier]);
    }

    fn hud_lines(&self) -> Vec<String> {
        let dimensions = [
            ('A', 'D', "Camera X", self.position.x),
            ('Q', 'E', "Camera Y", self.position.y),
            ('W', 'S', "Camera Z", self.position.z),
            ('R', 'F', "Camera W", self.position.w),
            ('T', 'G', "Scale", self.scale),
            ('Y', 'H', "Constant", self.constant),
            ('U', 'J', "Multiplier", self.multiplier),
        ];
        dimensions
            .iter()
            .map(|(a, b, name, value)| format!("[{},{}] {} = {:.1}", a, b, name, value))
            .collect()
    }
}

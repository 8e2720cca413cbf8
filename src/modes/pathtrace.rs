use super::{ModeBehavior, ParameterBlock};
use crate::input::{Button, Input};
use crate::vector::{Sphere, Vec3f};

const STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathTraceParams {
    pub sphere: Sphere,
    pub position: Vec3f,
}

impl Default for PathTraceParams {
    fn default() -> Self {
        PathTraceParams {
            sphere: Sphere::new(Vec3f::new(0.0, 0.0, -3.0), 1.0),
            position: Vec3f::ZERO,
        }
    }
}

impl ModeBehavior for PathTraceParams {
    const FIELD_COUNT: usize = 7;

    fn update(&mut self, input: &Input, _dt: f32) {
        if input.held(Button::MoveForward) {
            self.position.z -= STEP;
        }
        if input.held(Button::MoveLeft) {
            self.position.x -= STEP;
        }
        if input.held(Button::MoveBack) {
            self.position.z += STEP;
        }
        if input.held(Button::MoveRight) {
            self.position.x += STEP;
        }
    }

    fn pack(&self, block: &mut ParameterBlock) {
        let [cx, cy, cz, r] = self.sphere.to_array();
        let [x, y, z] = self.position.to_array();
        block.write_fields(&[cx, cy, cz, r, x, y, z]);
    }

    fn hud_lines(&self) -> Vec<String> {
        vec![
            format!("[A,D] Position X = {:.1}", self.position.x),
            format!("[W,S] Position Z = {:.1}", self.position.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_left_decrease_position() {
        let mut mode = PathTraceParams::default();
        let mut input = Input::new();
        input.press(Button::MoveForward);
        input.press(Button::MoveLeft);
        input.press(Button::MoveUp);
        mode.update(&input, 0.016);
        mode.update(&input, 0.016);
        assert!((mode.position.z - -0.2).abs() < 1e-6);
        assert!((mode.position.x - -0.2).abs() < 1e-6);
        assert_eq!(mode.position.y, 0.0);
        assert_eq!(mode.sphere, PathTraceParams::default().sphere);
    }

    #[test]
    fn opposing_buttons_cancel() {
        let mut mode = PathTraceParams::default();
        let mut input = Input::new();
        input.press(Button::MoveBack);
        input.press(Button::MoveForward);
        mode.update(&input, 0.016);
        assert_eq!(mode.position.z, 0.0);
    }

    #[test]
    fn block_layout_is_sphere_then_position() {
        let mut mode = PathTraceParams::default();
        mode.position = Vec3f::new(1.0, 2.0, 3.0);
        let mut block = ParameterBlock::default();
        mode.pack(&mut block);
        assert_eq!(&block.as_slice()[..7], &[0.0, 0.0, -3.0, 1.0, 1.0, 2.0, 3.0]);
    }
}

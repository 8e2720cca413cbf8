use super::{ModeBehavior, ParameterBlock};
use crate::input::{Button, Input};
use crate::vector::{Sphere, Vec3f};

const STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HolographParams {
    pub sphere: Sphere,
    pub position: Vec3f,
}

impl Default for HolographParams {
    fn default() -> Self {
        HolographParams {
            sphere: Sphere::new(Vec3f::ZERO, 1.0),
            position: Vec3f::splat(-2.0),
        }
    }
}

impl ModeBehavior for HolographParams {
    const FIELD_COUNT: usize = 7;

    fn update(&mut self, input: &Input, _dt: f32) {
        if input.held(Button::MoveForward) {
            self.position.z += STEP;
        }
        if input.held(Button::MoveLeft) {
            self.position.x += STEP;
        }
        if input.held(Button::MoveBack) {
            self.position.z -= STEP;
        }
        if input.held(Button::MoveRight) {
            self.position.x -= STEP;
        }
        if input.held(Button::MoveUp) {
            self.position.y += STEP;
        }
        if input.held(Button::MoveDown) {
            self.position.y -= STEP;
        }
    }

    fn pack(&self, block: &mut ParameterBlock) {
        let [cx, cy, cz, r] = self.sphere.to_array();
        let [x, y, z] = self.position.to_array();
        block.write_fields(&[cx, cy, cz, r, x, y, z]);
    }

    fn hud_lines(&self) -> Vec<String> {
        let p = self.position;
        let inside = if self.sphere.contains(p) { "inside" } else { "outside" };
        vec![
            format!("[A,D] Point X = {:.1}", p.x),
            format!("[Q,E] Point Y = {:.1}", p.y),
            format!("[W,S] Point Z = {:.1}", p.z),
            format!("Point is {} the sphere", inside),
        ]
    }
}

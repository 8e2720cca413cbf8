use cgmath::{Deg, Matrix4, Point3, Vector3};
use std::f32::consts::TAU;

use crate::vector::{Vec2f, Vec3f};

/// Azimuth values above this are treated as runaway and reset to zero.
const AZIMUTH_RUNAWAY_LIMIT: f32 = 10.0;

const FOV_Y_DEGREES: f32 = 75.0;
const NEAR_PLANE: f32 = 0.05;
const FAR_PLANE: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomEasing {
    /// Fixed blend per tick, regardless of frame duration.
    PerTick,
    /// Blend rescaled so that one tick of `reference_dt` equals one `PerTick` step.
    FrameRateIndependent { reference_dt: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub angular_speed: f32,
    pub scroll_step: f32,
    pub distance_lerp_factor: f32,
    pub max_distance: f32,
    pub min_phi: f32,
    pub max_phi: f32,
    pub easing: ZoomEasing,
    pub initial_phi: f32,
    pub initial_theta: f32,
    pub initial_distance: f32,
    pub initial_target_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            angular_speed: 0.005,
            scroll_step: 0.2,
            distance_lerp_factor: 0.10,
            max_distance: 4.0,
            min_phi: 0.01,
            max_phi: 3.14,
            easing: ZoomEasing::PerTick,
            initial_phi: 1.1,
            initial_theta: 1.2,
            initial_distance: 15.0,
            initial_target_distance: 2.0,
        }
    }
}

/// Folds an azimuth into `[0, 2π)`.
pub fn wrap_azimuth(theta: f32) -> f32 {
    let mut wrapped = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU.
    if wrapped >= TAU {
        wrapped -= TAU;
    }
    if wrapped > AZIMUTH_RUNAWAY_LIMIT {
        wrapped = 0.0;
    }
    wrapped
}

/// Camera constrained to a sphere around the origin.
///
/// `phi` is the polar angle measured from +Y, `theta` the azimuth in the XZ
/// plane. The eye position is derived from these and `distance` on demand.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub phi: f32,
    pub theta: f32,
    pub distance: f32,
    pub target_distance: f32,
    settings: CameraSettings,
}

impl OrbitCamera {
    pub fn new(settings: CameraSettings) -> Self {
        OrbitCamera {
            phi: settings.initial_phi,
            theta: settings.initial_theta,
            distance: settings.initial_distance,
            target_distance: settings.initial_target_distance,
            settings,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Advances the camera by one tick. `min_distance` comes from the active mode.
    pub fn update(
        &mut self,
        pointer_delta: Vec2f,
        scroll_up: bool,
        scroll_down: bool,
        min_distance: f32,
        dt: f32,
    ) {
        let s = self.settings;

        self.phi -= pointer_delta.y * s.angular_speed;
        self.theta += pointer_delta.x * s.angular_speed;

        self.phi = self.phi.clamp(s.min_phi, s.max_phi);
        self.theta = wrap_azimuth(self.theta);

        if scroll_up {
            self.target_distance -= s.scroll_step;
        }
        if scroll_down {
            self.target_distance += s.scroll_step;
        }
        self.target_distance = self.target_distance.clamp(min_distance, s.max_distance);

        let factor = self.blend_factor(dt);
        self.distance += (self.target_distance - self.distance) * factor;
    }

    fn blend_factor(&self, dt: f32) -> f32 {
        let factor = self.settings.distance_lerp_factor;
        match self.settings.easing {
            ZoomEasing::PerTick => factor,
            ZoomEasing::FrameRateIndependent { reference_dt } => {
                if dt <= 0.0 || reference_dt <= 0.0 {
                    return 0.0;
                }
                1.0 - (1.0 - factor).powf(dt / reference_dt)
            }
        }
    }

    pub fn eye(&self) -> Vec3f {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3f::new(
            self.distance * sin_phi * cos_theta,
            self.distance * cos_phi,
            self.distance * sin_phi * sin_theta,
        )
    }

    /// Perspective * look-at-origin, +Y up.
    pub fn view_projection(&self, aspect: f32) -> Matrix4<f32> {
        let projection = cgmath::perspective(Deg(FOV_Y_DEGREES), aspect, NEAR_PLANE, FAR_PLANE);
        let view = Matrix4::look_at_rh(
            Point3::from(self.eye()),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        projection * view
    }
}

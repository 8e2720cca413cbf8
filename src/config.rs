use crate::camera::{CameraSettings, ZoomEasing};
use crate::modes::ModeKind;
use crate::voxel_order::RolePolicy;

/// Tick length that one `PerTick` zoom step is calibrated against.
pub const REFERENCE_FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Clone, Debug)]
pub struct SandboxConfig {
    pub initial_mode: ModeKind,
    pub camera: CameraSettings,
    pub role_policy: RolePolicy,
    pub hud_interval: u64,
    pub window_title: String,
}

impl SandboxConfig {
    pub fn with_defaults() -> Self {
        Self {
            initial_mode: ModeKind::Holograph,
            camera: CameraSettings::default(),
            role_policy: RolePolicy::Legacy,
            hud_interval: 30,
            window_title: "fourdee".to_string(),
        }
    }

    pub fn with_frame_rate_independent_zoom(mut self) -> Self {
        self.camera.easing = ZoomEasing::FrameRateIndependent {
            reference_dt: REFERENCE_FRAME_DT,
        };
        self
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

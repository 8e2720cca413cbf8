use bytemuck::{Pod, Zeroable};
use log::{debug, info, warn};

use crate::camera::OrbitCamera;
use crate::config::SandboxConfig;
use crate::input::Input;
use crate::modes::{ModeKind, ModeParams, ModeRegistry, ParameterBlock};
use crate::simulation::SimulationState;
use crate::vector::Vec3f;
use crate::voxel_order::VisibilityOrdering;

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, Pod, Zeroable)]
pub struct VoxelUniforms {
    pub view_projection: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub grid_length: u32,
    pub padding: [u32; 3],
}

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, Pod, Zeroable)]
pub struct ModeUniforms {
    pub block: ParameterBlock,
    pub time: f32,
    pub mode_index: u32,
    pub padding: [u32; 2],
}

/// Everything the renderer needs for one frame. Read-only for the duration
/// of the submission.
pub struct FrameOutput<'a> {
    pub frame_number: u64,
    pub mode: ModeKind,
    pub mode_changed: bool,
    /// Camera polar angle and azimuth after this frame's update.
    pub phi: f32,
    pub theta: f32,
    pub params: &'a ModeParams,
    pub voxel: VoxelUniforms,
    pub uniforms: ModeUniforms,
    /// `permutation[slot]` is the voxel drawn at instance `slot`.
    pub permutation: &'a [u32],
}

impl FrameOutput<'_> {
    pub fn eye(&self) -> Vec3f {
        let [x, y, z, _] = self.voxel.eye;
        Vec3f::new(x, y, z)
    }

    pub fn grid_length(&self) -> u32 {
        self.voxel.grid_length
    }
}

/// Receives each finished frame, e.g. to upload it to the GPU.
pub trait FrameSink {
    fn submit(&mut self, frame: &FrameOutput<'_>);
}

/// Writes the HUD to the log every `interval` frames and on every mode change.
pub struct LogSink {
    interval: u64,
}

impl LogSink {
    pub fn new(interval: u64) -> Self {
        LogSink { interval: interval.max(1) }
    }
}

impl FrameSink for LogSink {
    fn submit(&mut self, frame: &FrameOutput<'_>) {
        if frame.mode_changed {
            info!("{}: {}", frame.mode.label(), frame.mode.description());
        }
        if frame.frame_number % self.interval != 0 && !frame.mode_changed {
            return;
        }
        let eye = frame.eye();
        debug!(
            "frame {} [{}] eye ({:.2}, {:.2}, {:.2}) phi {:.2} theta {:.2} grid {}^3 t {:.2}s",
            frame.frame_number,
            frame.mode.label(),
            eye.x,
            eye.y,
            eye.z,
            frame.phi,
            frame.theta,
            frame.grid_length(),
            frame.uniforms.time
        );
        for line in frame.params.hud_lines() {
            debug!("    {}", line);
        }
    }
}

/// Owns the camera, the simulation and the ordering buffer and steps them
/// in order once per frame.
pub struct Sandbox {
    camera: OrbitCamera,
    simulation: SimulationState,
    ordering: VisibilityOrdering,
    aspect: f32,
    frame_number: u64,
}

impl Sandbox {
    pub fn new(config: &SandboxConfig) -> Self {
        let simulation = SimulationState::starting_at(ModeRegistry::standard(), config.initial_mode);
        let descriptor = simulation.current();
        info!(
            "starting in {} mode (grid {}^3)",
            descriptor.kind.label(),
            descriptor.grid_length
        );
        Sandbox {
            camera: OrbitCamera::new(config.camera),
            simulation,
            ordering: VisibilityOrdering::new(config.role_policy),
            aspect: 1.0,
            frame_number: 0,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.simulation
    }

    pub fn frames(&self) -> u64 {
        self.frame_number
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn step(&mut self, input: &Input, dt: f32) -> FrameOutput<'_> {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("discarding frame delta {}", dt);
            0.0
        };

        let mode_before = self.simulation.current_index();
        let min_distance = self.simulation.current().min_distance;
        self.camera.update(
            input.pointer_delta,
            input.scroll_up,
            input.scroll_down,
            min_distance,
            dt,
        );

        self.simulation.tick(input, dt);

        let descriptor = *self.simulation.current();
        let eye = self.camera.eye();
        let permutation = self.ordering.recompute(eye, descriptor.grid_length);

        let voxel = VoxelUniforms {
            view_projection: self.camera.view_projection(self.aspect).into(),
            eye: eye.extend(1.0).to_array(),
            grid_length: descriptor.grid_length,
            padding: [0; 3],
        };
        let uniforms = ModeUniforms {
            block: self.simulation.block(),
            time: self.simulation.time_since_init(),
            mode_index: self.simulation.current_index() as u32,
            padding: [0; 2],
        };

        let frame_number = self.frame_number;
        self.frame_number += 1;

        FrameOutput {
            frame_number,
            mode: descriptor.kind,
            mode_changed: self.simulation.current_index() != mode_before,
            phi: self.camera.phi,
            theta: self.camera.theta,
            params: self.simulation.params(),
            voxel,
            uniforms,
            permutation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;

    struct CountingSink {
        frames: usize,
        mode_changes: usize,
    }

    impl FrameSink for CountingSink {
        fn submit(&mut self, frame: &FrameOutput<'_>) {
            self.frames += 1;
            if frame.mode_changed {
                self.mode_changes += 1;
            }
        }
    }

    #[test]
    fn uniform_blocks_have_gpu_sizes() {
        assert_eq!(std::mem::size_of::<ParameterBlock>(), 64);
        assert_eq!(std::mem::size_of::<ModeUniforms>(), 80);
        assert_eq!(std::mem::size_of::<VoxelUniforms>(), 96);
    }

    #[test]
    fn frames_carry_bijective_ordering_for_active_mode() {
        let mut sandbox = Sandbox::new(&SandboxConfig::with_defaults());
        let mut input = Input::new();
        let mut sink = CountingSink { frames: 0, mode_changes: 0 };
        for frame in 0..12 {
            input.pointer_delta.x = 40.0;
            input.pointer_delta.y = if frame % 2 == 0 { 25.0 } else { -60.0 };
            if frame % 3 == 0 {
                input.press(Button::CycleMode);
            }
            let output = sandbox.step(&input, 1.0 / 60.0);
            let length = output.grid_length();
            assert_eq!(output.permutation.len() as u32, length * length * length);
            let mut sorted = output.permutation.to_vec();
            sorted.sort_unstable();
            assert!(sorted.iter().enumerate().all(|(i, v)| i as u32 == *v));
            sink.submit(&output);
            input.end_tick();
            if frame % 3 == 0 {
                input.release(Button::CycleMode);
            }
        }
        assert_eq!(sink.frames, 12);
        assert_eq!(sink.mode_changes, 4);
    }

    #[test]
    fn step_threads_camera_into_ordering() {
        let mut sandbox = Sandbox::new(&SandboxConfig::with_defaults());
        let output = sandbox.step(&Input::new(), 1.0 / 60.0);
        assert_eq!(output.mode, ModeKind::Holograph);
        assert_eq!(output.grid_length(), 8);
        let eye = output.eye();
        let expected = crate::voxel_order::order(eye, 8);
        assert_eq!(output.permutation, expected.as_slice());
        assert_eq!(output.uniforms.block, ModeKind::Holograph.initialize().to_block());
        assert_eq!(output.frame_number, 0);
    }

    #[test]
    fn zoom_range_follows_active_mode() {
        let mut sandbox = Sandbox::new(&SandboxConfig::with_defaults());
        let mut input = Input::new();
        input.scroll_up = true;
        for _ in 0..50 {
            sandbox.step(&input, 1.0 / 60.0);
        }
        assert!((sandbox.camera().target_distance - 0.4).abs() < 1e-5);

        // Path trace keeps the camera further out.
        input.press(Button::SelectPrevious);
        sandbox.step(&input, 1.0 / 60.0);
        input.end_tick();
        input.scroll_up = true;
        sandbox.step(&input, 1.0 / 60.0);
        assert_eq!(sandbox.simulation().current().kind, ModeKind::PathTrace);
        assert!((sandbox.camera().target_distance - 1.4).abs() < 1e-5);
    }

    #[test]
    fn non_finite_dt_is_ignored() {
        let mut sandbox = Sandbox::new(&SandboxConfig::with_defaults());
        let output = sandbox.step(&Input::new(), f32::NAN);
        assert_eq!(output.uniforms.time, 0.0);
    }
}

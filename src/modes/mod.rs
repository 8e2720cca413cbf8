//! Simulation modes and the registry that orders them.
//!
//! Every mode owns a small typed parameter set. [`ModeParams`] is the closed
//! sum of those sets; a mode switch replaces it wholesale with the new mode's
//! defaults. For upload, the active variant is packed into a fixed-capacity
//! [`ParameterBlock`] whose unused trailing slots are always zero.

mod grid_game;
mod holograph;
mod pathtrace;
mod wave;

use bytemuck::{Pod, Zeroable};

use crate::input::Input;

pub use grid_game::GridGameParams;
pub use holograph::HolographParams;
pub use pathtrace::PathTraceParams;
pub use wave::WaveParams;

pub const PARAMETER_BLOCK_CAPACITY: usize = 16;

/// Behavior shared by every mode's parameter set. `Default` is the mode's
/// initial state.
pub trait ModeBehavior: Default {
    /// Number of leading block slots this mode writes.
    const FIELD_COUNT: usize;

    fn update(&mut self, input: &Input, dt: f32);

    fn pack(&self, block: &mut ParameterBlock);

    fn hud_lines(&self) -> Vec<String>;
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParameterBlock {
    values: [f32; PARAMETER_BLOCK_CAPACITY],
}

impl Default for ParameterBlock {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl ParameterBlock {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    /// Writes `fields` into the leading slots. Panics if they exceed the capacity.
    pub fn write_fields(&mut self, fields: &[f32]) {
        assert!(
            fields.len() <= PARAMETER_BLOCK_CAPACITY,
            "mode writes {} fields into a block of {}",
            fields.len(),
            PARAMETER_BLOCK_CAPACITY
        );
        self.values[..fields.len()].copy_from_slice(fields);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    PathTrace,
    Holograph,
    Wave,
    GridGame,
}

impl ModeKind {
    pub fn label(self) -> &'static str {
        match self {
            ModeKind::PathTrace => "path-trace",
            ModeKind::Holograph => "holograph",
            ModeKind::Wave => "wave",
            ModeKind::GridGame => "grid-game",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ModeKind::PathTrace => "A path-traced sphere seen through the voxels.",
            ModeKind::Holograph => "A holographic point orbiting a sphere.",
            ModeKind::Wave => "Fun with sine waves.",
            ModeKind::GridGame => "Hunt the hidden cell.",
        }
    }

    pub fn initialize(self) -> ModeParams {
        match self {
            ModeKind::PathTrace => ModeParams::PathTrace(PathTraceParams::default()),
            ModeKind::Holograph => ModeParams::Holograph(HolographParams::default()),
            ModeKind::Wave => ModeParams::Wave(WaveParams::default()),
            ModeKind::GridGame => ModeParams::GridGame(GridGameParams::default()),
        }
    }

    pub fn field_count(self) -> usize {
        match self {
            ModeKind::PathTrace => PathTraceParams::FIELD_COUNT,
            ModeKind::Holograph => HolographParams::FIELD_COUNT,
            ModeKind::Wave => WaveParams::FIELD_COUNT,
            ModeKind::GridGame => GridGameParams::FIELD_COUNT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModeParams {
    PathTrace(PathTraceParams),
    Holograph(HolographParams),
    Wave(WaveParams),
    GridGame(GridGameParams),
}

impl ModeParams {
    pub fn kind(&self) -> ModeKind {
        match self {
            ModeParams::PathTrace(_) => ModeKind::PathTrace,
            ModeParams::Holograph(_) => ModeKind::Holograph,
            ModeParams::Wave(_) => ModeKind::Wave,
            ModeParams::GridGame(_) => ModeKind::GridGame,
        }
    }

    pub fn update(&mut self, input: &Input, dt: f32) {
        match self {
            ModeParams::PathTrace(p) => p.update(input, dt),
            ModeParams::Holograph(p) => p.update(input, dt),
            ModeParams::Wave(p) => p.update(input, dt),
            ModeParams::GridGame(p) => p.update(input, dt),
        }
    }

    pub fn to_block(&self) -> ParameterBlock {
        let mut block = ParameterBlock::zeroed();
        match self {
            ModeParams::PathTrace(p) => p.pack(&mut block),
            ModeParams::Holograph(p) => p.pack(&mut block),
            ModeParams::Wave(p) => p.pack(&mut block),
            ModeParams::GridGame(p) => p.pack(&mut block),
        }
        block
    }

    pub fn hud_lines(&self) -> Vec<String> {
        match self {
            ModeParams::PathTrace(p) => p.hud_lines(),
            ModeParams::Holograph(p) => p.hud_lines(),
            ModeParams::Wave(p) => p.hud_lines(),
            ModeParams::GridGame(p) => p.hud_lines(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeDescriptor {
    pub kind: ModeKind,
    /// Edge length of the cubic voxel grid this mode drives.
    pub grid_length: u32,
    /// Closest the orbit camera may zoom in this mode.
    pub min_distance: f32,
}

impl ModeDescriptor {
    pub fn initialize(&self) -> ModeParams {
        self.kind.initialize()
    }

    pub fn update(&self, params: &mut ModeParams, input: &Input, dt: f32) {
        assert_eq!(
            params.kind(),
            self.kind,
            "parameters do not belong to the active mode"
        );
        params.update(input, dt);
    }
}

/// Fixed, ordered and cyclically indexed table of modes.
#[derive(Clone, Debug)]
pub struct ModeRegistry {
    modes: Vec<ModeDescriptor>,
}

impl ModeRegistry {
    pub fn new(modes: Vec<ModeDescriptor>) -> Self {
        assert!(!modes.is_empty(), "mode registry must not be empty");
        ModeRegistry { modes }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            ModeDescriptor {
                kind: ModeKind::PathTrace,
                grid_length: 16,
                min_distance: 1.4,
            },
            ModeDescriptor {
                kind: ModeKind::Holograph,
                grid_length: 8,
                min_distance: 0.4,
            },
            ModeDescriptor {
                kind: ModeKind::Wave,
                grid_length: 16,
                min_distance: 0.8,
            },
            ModeDescriptor {
                kind: ModeKind::GridGame,
                grid_length: 4,
                min_distance: 0.8,
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Panics on an out-of-range index.
    pub fn get(&self, index: usize) -> &ModeDescriptor {
        &self.modes[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModeDescriptor> {
        self.modes.iter()
    }

    pub fn index_of(&self, kind: ModeKind) -> Option<usize> {
        self.modes.iter().position(|m| m.kind == kind)
    }

    /// `index` moved by `step` entries with wraparound.
    pub fn cycle(&self, index: usize, step: isize) -> usize {
        let len = self.modes.len() as isize;
        (index as isize + step).rem_euclid(len) as usize
    }
}

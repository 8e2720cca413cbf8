use log::info;

use crate::input::{Button, Input};
use crate::modes::{ModeDescriptor, ModeKind, ModeParams, ModeRegistry, ParameterBlock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeSwitch {
    Previous,
    Next,
}

impl ModeSwitch {
    /// At most one switch per tick; retreating wins over advancing.
    pub fn from_input(input: &Input) -> Option<ModeSwitch> {
        if input.pressed(Button::SelectPrevious) {
            Some(ModeSwitch::Previous)
        } else if input.pressed(Button::CycleMode) || input.pressed(Button::SelectNext) {
            Some(ModeSwitch::Next)
        } else {
            None
        }
    }

    fn step(self) -> isize {
        match self {
            ModeSwitch::Previous => -1,
            ModeSwitch::Next => 1,
        }
    }
}

pub struct SimulationState {
    registry: ModeRegistry,
    current_mode: usize,
    params: ModeParams,
    time_since_init: f32,
}

impl SimulationState {
    pub fn new(registry: ModeRegistry, initial_mode: usize) -> Self {
        assert!(
            initial_mode < registry.len(),
            "initial mode {} out of range for {} modes",
            initial_mode,
            registry.len()
        );
        let params = registry.get(initial_mode).initialize();
        SimulationState {
            registry,
            current_mode: initial_mode,
            params,
            time_since_init: 0.0,
        }
    }

    /// Starts on the first registry entry of `kind`, or entry 0 if absent.
    pub fn starting_at(registry: ModeRegistry, kind: ModeKind) -> Self {
        let index = registry.index_of(kind).unwrap_or(0);
        Self::new(registry, index)
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn current_index(&self) -> usize {
        self.current_mode
    }

    pub fn current(&self) -> &ModeDescriptor {
        self.registry.get(self.current_mode)
    }

    pub fn params(&self) -> &ModeParams {
        &self.params
    }

    pub fn block(&self) -> ParameterBlock {
        self.params.to_block()
    }

    pub fn time_since_init(&self) -> f32 {
        self.time_since_init
    }

    /// Moves to a neighbouring mode and reinitializes its parameters.
    pub fn switch(&mut self, direction: ModeSwitch) {
        let from = self.current().kind;
        let next = self.registry.cycle(self.current_mode, direction.step());
        let params = self.registry.get(next).initialize();

        self.current_mode = next;
        self.params = params;

        let to = self.current();
        info!(
            "mode {} -> {} (grid {}^3)",
            from.label(),
            to.kind.label(),
            to.grid_length
        );
    }

    /// One frame: a requested switch replaces this tick's update.
    pub fn tick(&mut self, input: &Input, dt: f32) {
        self.time_since_init += dt;

        match ModeSwitch::from_input(input) {
            Some(direction) => self.switch(direction),
            None => {
                let descriptor = *self.registry.get(self.current_mode);
                descriptor.update(&mut self.params, input, dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::PARAMETER_BLOCK_CAPACITY;

    fn press(button: Button) -> Input {
        let mut input = Input::new();
        input.press(button);
        input
    }

    #[test]
    fn starts_on_requested_kind() {
        let sim = SimulationState::starting_at(ModeRegistry::standard(), ModeKind::Holograph);
        assert_eq!(sim.current_index(), 1);
        assert_eq!(sim.current().grid_length, 8);
        assert_eq!(*sim.params(), ModeKind::Holograph.initialize());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_initial_mode_is_fatal() {
        SimulationState::new(ModeRegistry::standard(), 4);
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let mut sim = SimulationState::new(ModeRegistry::standard(), 3);
        sim.tick(&press(Button::CycleMode), 0.016);
        assert_eq!(sim.current_index(), 0);
        sim.tick(&press(Button::SelectPrevious), 0.016);
        assert_eq!(sim.current_index(), 3);
        sim.tick(&press(Button::SelectNext), 0.016);
        assert_eq!(sim.current_index(), 0);
        for _ in 0..8 {
            sim.tick(&press(Button::SelectNext), 0.016);
        }
        assert_eq!(sim.current_index(), 0);
    }

    #[test]
    fn switch_resets_block_beyond_new_layout() {
        let mut sim = SimulationState::starting_at(ModeRegistry::standard(), ModeKind::Wave);
        let mut input = Input::new();
        for button in [
            Button::MoveLeft,
            Button::MoveUp,
            Button::MoveForward,
            Button::MoveAna,
            Button::ScaleUp,
            Button::ConstantUp,
            Button::MultiplierUp,
        ] {
            input.press(button);
        }
        for _ in 0..10 {
            sim.tick(&input, 0.016);
        }
        assert!(sim.block().as_slice()[..7].iter().all(|v| *v != 0.0));

        sim.tick(&press(Button::CycleMode), 0.016);
        assert_eq!(sim.current().kind, ModeKind::GridGame);
        let block = sim.block();
        assert!(block.as_slice().iter().all(|v| *v == 0.0));

        sim.tick(&press(Button::SelectPrevious), 0.016);
        let block = sim.block();
        assert_eq!(sim.current().kind, ModeKind::Wave);
        assert_eq!(&block.as_slice()[..7], &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
        assert!(block.as_slice()[7..PARAMETER_BLOCK_CAPACITY].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn switch_tick_skips_update() {
        let mut sim = SimulationState::starting_at(ModeRegistry::standard(), ModeKind::PathTrace);
        let mut input = press(Button::CycleMode);
        input.press(Button::MoveRight);
        sim.tick(&input, 0.016);
        assert_eq!(*sim.params(), ModeKind::Holograph.initialize());
    }

    #[test]
    fn elapsed_time_accumulates_across_switches() {
        let mut sim = SimulationState::new(ModeRegistry::standard(), 0);
        sim.tick(&Input::new(), 0.5);
        sim.tick(&press(Button::CycleMode), 0.25);
        assert_eq!(sim.time_since_init(), 0.75);
    }
}

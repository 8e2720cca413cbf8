use clap::{Parser, ValueEnum};
use fourdee::app::{run_headless, run_windowed};
use fourdee::config::SandboxConfig;
use fourdee::modes::ModeKind;
use fourdee::voxel_order::RolePolicy;
use std::error::Error;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Voxel visualization sandbox", long_about = None)]
struct Args {
    /// Mode to start in
    #[arg(long, value_enum, default_value_t = ModeArg::Holograph)]
    mode: ModeArg,

    /// Run a scripted session without opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Fixed frame delta in seconds for headless mode
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Assign voxel axis roles by sorted eye magnitude
    #[arg(long)]
    ranked_axes: bool,

    /// Ease camera zoom by elapsed time instead of per frame
    #[arg(long)]
    frame_rate_independent_zoom: bool,

    /// Frames between HUD log lines
    #[arg(long, default_value_t = 30)]
    hud_interval: u64,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    PathTrace,
    Holograph,
    Wave,
    GridGame,
}

impl ModeArg {
    fn to_mode_kind(self) -> ModeKind {
        match self {
            ModeArg::PathTrace => ModeKind::PathTrace,
            ModeArg::Holograph => ModeKind::Holograph,
            ModeArg::Wave => ModeKind::Wave,
            ModeArg::GridGame => ModeKind::GridGame,
        }
    }
}

impl Args {
    fn to_config(&self) -> SandboxConfig {
        let mut config = SandboxConfig::with_defaults();
        config.initial_mode = self.mode.to_mode_kind();
        config.hud_interval = self.hud_interval;
        if self.ranked_axes {
            config.role_policy = RolePolicy::Ranked;
        }
        if self.frame_rate_independent_zoom {
            config = config.with_frame_rate_independent_zoom();
        }
        config
    }
}

fn main() -> Result<(), impl Error> {
    let args = Args::parse();
    fourdee::init_logging();
    let config = args.to_config();

    if args.headless {
        run_headless(&config, args.frames, args.dt);
        Ok(())
    } else {
        run_windowed(config)
    }
}

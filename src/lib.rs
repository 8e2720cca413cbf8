pub mod app;
pub mod camera;
pub mod config;
pub mod frame;
pub mod input;
pub mod modes;
pub mod simulation;
pub mod vector;
pub mod voxel_order;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::config::SandboxConfig;

pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            console_log::init_with_level(log::Level::Debug).expect("Couldn't initialize logger");
        } else {
            env_logger::init();
        }
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn run() {
    init_logging();
    if let Err(err) = app::run_windowed(SandboxConfig::with_defaults()) {
        log::error!("event loop terminated: {}", err);
    }
}

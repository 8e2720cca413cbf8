use log::info;
use web_time::Instant;
use winit::{
    error::EventLoopError,
    event::{DeviceEvent, ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowBuilder},
};

use crate::config::SandboxConfig;
use crate::frame::{FrameSink, LogSink, Sandbox};
use crate::input::{Button, Input};
use crate::modes::ModeKind;
use crate::vector::{Vec2f, Vec3f};

const HEADLESS_DRAG_X: f32 = 4.0;
const HEADLESS_DRAG_Y: f32 = 1.5;

fn grab_cursor(window: &Window) -> bool {
    let result = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if result.is_ok() {
        window.set_cursor_visible(false);
    }
    result.is_ok()
}

fn release_cursor(window: &Window) {
    let _ = window.set_cursor_grab(CursorGrabMode::None);
    window.set_cursor_visible(true);
}

pub fn run_windowed(config: SandboxConfig) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .build(&event_loop)
        .expect("Couldn't create window");

    #[cfg(target_arch = "wasm32")]
    {
        // The canvas ignores CSS sizing.
        use winit::dpi::PhysicalSize;
        let _ = window.request_inner_size(PhysicalSize::new(450, 400));

        use winit::platform::web::WindowExtWebSys;
        web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("wasm-example")?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            })
            .expect("Couldn't append canvas to document body.");
    }

    let mut sandbox = Sandbox::new(&config);
    let size = window.inner_size();
    sandbox.set_viewport(size.width, size.height);

    let mut input = Input::new();
    let mut sink = LogSink::new(config.hud_interval);
    let mut cursor_grabbed = grab_cursor(&window);
    let mut titled_mode: Option<ModeKind> = None;
    let mut last_frame = Instant::now();

    event_loop.run(move |event, target| match event {
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = (now - last_frame).as_secs_f32();
            last_frame = now;

            if !cursor_grabbed {
                input.pointer_delta = Vec2f::ZERO;
            }

            let frame = sandbox.step(&input, dt);
            if titled_mode != Some(frame.mode) {
                window.set_title(&format!("{} - {}", config.window_title, frame.mode.label()));
                titled_mode = Some(frame.mode);
            }
            sink.submit(&frame);
            input.end_tick();
        }
        Event::DeviceEvent {
            event: DeviceEvent::MouseMotion { delta },
            ..
        } => {
            if cursor_grabbed {
                input.handle_mouse_motion(delta);
            }
        }
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::Resized(new_size) => {
                sandbox.set_viewport(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                input.handle_key_event(&event);
                if input.take_escape() {
                    if cursor_grabbed {
                        release_cursor(&window);
                        cursor_grabbed = false;
                        input.release_all();
                    } else {
                        target.exit();
                    }
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if !cursor_grabbed {
                    cursor_grabbed = grab_cursor(&window);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => input.handle_scroll(delta),
            WindowEvent::Focused(false) => input.release_all(),
            _ => {}
        },
        Event::LoopExiting => {
            info!("exiting after {} frames", sandbox.frames());
        }
        _ => {}
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessReport {
    pub frames: u64,
    pub modes_visited: Vec<ModeKind>,
    pub final_eye: Vec3f,
    pub final_distance: f32,
}

/// Slow orbit, zoom in during the first quarter, advance the mode every quarter.
fn script_input(frame: u64, frames: u64, input: &mut Input) {
    let quarter = (frames / 4).max(1);

    input.pointer_delta = Vec2f::new(
        HEADLESS_DRAG_X,
        if (frame / 60) % 2 == 0 { HEADLESS_DRAG_Y } else { -HEADLESS_DRAG_Y },
    );
    input.scroll_up = frame < quarter && frame % 5 == 0;

    if frame > 0 && frame % quarter == 0 {
        input.press(Button::CycleMode);
    } else if input.held(Button::CycleMode) {
        input.release(Button::CycleMode);
    }

    let hold_left = frame % quarter >= quarter / 2;
    if hold_left && !input.held(Button::MoveLeft) {
        input.press(Button::MoveLeft);
    } else if !hold_left && input.held(Button::MoveLeft) {
        input.release(Button::MoveLeft);
    }
}

pub fn run_headless(config: &SandboxConfig, frames: u64, dt: f32) -> HeadlessReport {
    let mut sandbox = Sandbox::new(config);
    let mut input = Input::new();
    let mut sink = LogSink::new(config.hud_interval);
    let mut modes_visited = vec![sandbox.simulation().current().kind];

    for frame in 0..frames {
        script_input(frame, frames, &mut input);
        let output = sandbox.step(&input, dt);
        if output.mode_changed {
            modes_visited.push(output.mode);
        }
        sink.submit(&output);
        input.end_tick();
    }

    let report = HeadlessReport {
        frames,
        modes_visited,
        final_eye: sandbox.camera().eye(),
        final_distance: sandbox.camera().distance,
    };
    info!(
        "headless run finished: {} frames, modes {:?}, camera distance {:.3}",
        report.frames, report.modes_visited, report.final_distance
    );
    report
}

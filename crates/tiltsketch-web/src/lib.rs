//! Browser bridge: one `SketchGame` session behind `#[wasm_bindgen]` exports.
//!
//! The host page forwards pointer input, resizes and taps; it calls
//! `game_tick` once per animation frame and then reads the header, vector
//! vertices and events out of wasm memory.

pub mod platform;
pub mod runner;

use std::cell::RefCell;

use tiltsketch::{InputEvent, PlatformRequest, ScreenRotation, SketchConfig, SketchGame};
use wasm_bindgen::prelude::*;

pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<SketchGame>>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner<SketchGame>) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Carry out a platform request after the runner borrow is released, since the
/// callbacks re-enter the runner.
fn perform(request: Option<PlatformRequest>) {
    match request {
        Some(PlatformRequest::RequestPermission) => {
            platform::request_orientation_permission(|response| {
                let next = with_runner(|r| r.permission_result(response));
                perform(next);
            });
        }
        Some(PlatformRequest::AttachOrientationListener) => {
            let attached = platform::attach_orientation_listener(|sample| {
                with_runner(|r| r.orientation_sample(&sample));
            });
            if let Err(err) = attached {
                log::warn!("could not attach deviceorientation listener: {:?}", err);
            }
        }
        None => {}
    }
}

fn start(game: SketchGame) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let profile = platform::probe();
    log::info!(
        "tiltsketch: device {:?}, rotation {}°, orientation {:?}",
        profile.class,
        profile.rotation.degrees(),
        profile.capability
    );

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::new(game, profile));
    });
    let request = with_runner(|r| r.init());
    perform(request);

    if let Err(err) = platform::watch_screen_rotation(|rotation| {
        with_runner(|r| r.set_screen_rotation(rotation));
    }) {
        log::warn!("could not watch screen rotation: {:?}", err);
    }
    log::info!("tiltsketch: initialized");
}

#[wasm_bindgen]
pub fn game_init() {
    start(SketchGame::new());
}

/// Start with settings from the page. Invalid JSON is logged and defaults are used.
#[wasm_bindgen]
pub fn game_init_with_config(json: &str) {
    let config = match SketchConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
            log::warn!("{}; using default settings", err);
            SketchConfig::default()
        }
    };
    start(SketchGame::with_config(config));
}

#[wasm_bindgen]
pub fn game_tick() {
    with_runner(|r| r.tick());
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel));
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

/// Call from a click/touchend handler. On consent-gated platforms the first
/// call asks for orientation permission.
#[wasm_bindgen]
pub fn game_user_gesture() {
    let request = with_runner(|r| r.user_gesture());
    perform(request);
}

/// Override the screen rotation, for hosts that track it themselves.
#[wasm_bindgen]
pub fn game_screen_rotation(degrees: i32) {
    let rotation = ScreenRotation::from_degrees(degrees).unwrap_or_default();
    with_runner(|r| r.set_screen_rotation(rotation));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn get_canvas_width() -> f32 {
    with_runner(|r| r.canvas_width())
}

#[wasm_bindgen]
pub fn get_canvas_height() -> f32 {
    with_runner(|r| r.canvas_height())
}

#[wasm_bindgen]
pub fn get_canvas_margin() -> f32 {
    with_runner(|r| r.game().settings().canvas_margin)
}

#[wasm_bindgen]
pub fn get_permission_state() -> f32 {
    with_runner(|r| r.permission_state())
}

#[wasm_bindgen]
pub fn get_gravity_x() -> f32 {
    with_runner(|r| r.gravity_x())
}

#[wasm_bindgen]
pub fn get_gravity_y() -> f32 {
    with_runner(|r| r.gravity_y())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_vector_vertices() -> u32 {
    with_runner(|r| r.max_vector_vertices())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_vertex_stride_floats() -> u32 {
    with_runner(|r| r.vertex_stride_floats())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

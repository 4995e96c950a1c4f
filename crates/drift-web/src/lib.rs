//! `#[wasm_bindgen]` exports for one particle background per page.
//!
//! JS mounts the background with a JSON config and the container size,
//! forwards pointer and resize events, and reads the packed instance
//! buffers straight out of wasm memory from a frame listener:
//!
//! ```ignore
//! background_mount(JSON.stringify({ variant: "snow" }), el.clientWidth, el.clientHeight);
//! background_set_frame_listener(() => {
//!     const floats = new Float32Array(memory.buffer, get_particles_ptr(), get_particle_count() * 12);
//!     paint(floats);
//! });
//! ```

pub mod runner;
pub mod scheduler;

pub use runner::BackgroundRunner;
pub use scheduler::RafScheduler;

use std::cell::RefCell;

use drift_engine::{BackgroundConfig, Glyph, ParticleInstance};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<BackgroundRunner>> = RefCell::new(None);
}

/// Run `f` against the mounted background; `None` (and a warning) if nothing is mounted.
fn with_runner<R>(f: impl FnOnce(&BackgroundRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.borrow().as_ref() {
        Some(runner) => Some(f(runner)),
        None => {
            log::warn!("background not mounted; call background_mount() first");
            None
        }
    })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialised by an earlier mount.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn parse_config(config_json: &str) -> BackgroundConfig {
    if config_json.trim().is_empty() {
        return BackgroundConfig::default();
    }
    BackgroundConfig::from_json(config_json).unwrap_or_else(|err| {
        log::error!("invalid background config ({}); using defaults", err);
        BackgroundConfig::default()
    })
}

/// Put `value` in the slot, handing back the previous occupant. Fails with
/// `value` when the slot is borrowed, e.g. by a JS call made from inside a
/// frame listener.
fn replace_slot<T>(cell: &RefCell<Option<T>>, value: T) -> Result<Option<T>, T> {
    match cell.try_borrow_mut() {
        Ok(mut slot) => Ok(slot.replace(value)),
        Err(_) => Err(value),
    }
}

fn install(runner: BackgroundRunner) {
    match RUNNER.with(|cell| replace_slot(cell, runner)) {
        // Dropped outside the borrow: its loop cancels the pending frame.
        Ok(previous) => drop(previous),
        Err(rejected) => {
            log::error!("background mounted while the current one is in use; keeping it");
            drop(rejected);
        }
    }
}

/// Mount (or remount) the background. Invalid JSON falls back to defaults.
#[wasm_bindgen]
pub fn background_mount(config_json: &str, width: f32, height: f32) {
    init_logging();
    let config = parse_config(config_json);
    log::info!(
        "drift: mounting {} background at {}x{}",
        config.variant.as_str(),
        width,
        height
    );
    install(BackgroundRunner::mount(config, width, height));
}

/// Mount one of the named presets (matrix, snow, bubbles, floating, japanese).
#[wasm_bindgen]
pub fn background_mount_preset(name: &str, width: f32, height: f32) {
    init_logging();
    let config = BackgroundConfig::preset(name).unwrap_or_else(|| {
        log::warn!("unknown preset {:?}; using defaults", name);
        BackgroundConfig::default()
    });
    install(BackgroundRunner::mount(config, width, height));
}

/// Replace the config of the mounted background.
#[wasm_bindgen]
pub fn background_reconfigure(config_json: &str) {
    let config = parse_config(config_json);
    with_runner(|r| r.reconfigure(config));
}

#[wasm_bindgen]
pub fn background_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn background_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.pointer_move(x, y));
}

#[wasm_bindgen]
pub fn background_pointer_leave() {
    with_runner(|r| r.pointer_leave());
}

#[wasm_bindgen]
pub fn background_set_playing(playing: bool) {
    with_runner(|r| r.set_playing(playing));
}

/// Flip play state. Returns true when now playing.
#[wasm_bindgen]
pub fn background_toggle() -> bool {
    with_runner(|r| r.toggle()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn background_is_playing() -> bool {
    with_runner(|r| r.is_playing()).unwrap_or(false)
}

/// Tear down the background and cancel its pending frame.
#[wasm_bindgen]
pub fn background_unmount() {
    let taken = RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.take(),
        Err(_) => {
            log::error!("background_unmount called while the background is in use");
            None
        }
    });
    if taken.is_some() {
        log::info!("drift: unmounted");
    }
}

/// Called with the frame timestamp after every drawn frame. Pass `null` to clear.
#[wasm_bindgen]
pub fn background_set_frame_listener(listener: Option<js_sys::Function>) {
    with_runner(|r| r.set_frame_listener(listener));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_particles_ptr() -> *const f32 {
    with_runner(|r| r.particles_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_lines_ptr() -> *const f32 {
    with_runner(|r| r.lines_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_line_count() -> u32 {
    with_runner(|r| r.line_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_overlays_ptr() -> *const f32 {
    with_runner(|r| r.overlays_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_overlay_count() -> u32 {
    with_runner(|r| r.overlay_count()).unwrap_or(0)
}

/// Floats per particle, line and overlay instance.
#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    ParticleInstance::FLOATS as u32
}

/// Character for a glyph code read from a glyph instance's `param` float.
#[wasm_bindgen]
pub fn glyph_char(code: u32) -> Option<String> {
    let code = u8::try_from(code).ok()?;
    Glyph::from_code(code).map(|g| g.as_char().to_string())
}

#[wasm_bindgen]
pub fn get_width() -> f32 {
    with_runner(|r| r.width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_height() -> f32 {
    with_runner(|r| r.height()).unwrap_or(0.0)
}

/// Frames stepped since mount.
#[wasm_bindgen]
pub fn background_frame_count() -> f64 {
    with_runner(|r| r.frame_count()).unwrap_or(0.0)
}

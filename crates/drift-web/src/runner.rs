use drift_engine::{AnimationLoop, Background, BackgroundConfig, Bounds};

use crate::scheduler::RafScheduler;

/// A mounted background driven by `requestAnimationFrame`.
///
/// The exports in `lib.rs` keep one of these in a `thread_local!`, because
/// wasm-bindgen cannot export the generic loop directly. Dropping the runner
/// cancels the pending frame.
pub struct BackgroundRunner {
    animation: AnimationLoop<Background, RafScheduler>,
    scheduler: RafScheduler,
}

impl BackgroundRunner {
    /// Seed against the container size, draw once, and start the loop if
    /// the config autoplays.
    pub fn mount(config: BackgroundConfig, width: f32, height: f32) -> Self {
        let scheduler = RafScheduler::new();
        let background = Background::mounted(config, Bounds::new(width, height));
        let animation = AnimationLoop::new(background, scheduler.clone());
        animation.start();
        Self { animation, scheduler }
    }

    pub fn resize(&self, width: f32, height: f32) {
        let repainted = self.animation.update(|bg| {
            bg.resize(width, height);
            if bg.is_running() {
                return false;
            }
            bg.refresh();
            true
        });
        if repainted {
            self.scheduler.notify(now_ms());
        }
    }

    pub fn pointer_move(&self, x: f32, y: f32) {
        self.animation.update(|bg| bg.pointer_move(x, y));
    }

    pub fn pointer_leave(&self) {
        self.animation.update(|bg| bg.pointer_leave());
    }

    pub fn set_playing(&self, playing: bool) {
        self.animation.update(|bg| bg.set_playing(playing));
    }

    pub fn toggle(&self) -> bool {
        self.animation.update(|bg| bg.toggle())
    }

    pub fn is_playing(&self) -> bool {
        self.animation.with(|bg| bg.is_running())
    }

    pub fn reconfigure(&self, config: BackgroundConfig) {
        let paused = self.animation.update(|bg| {
            bg.reconfigure(config);
            !bg.is_running()
        });
        if paused {
            self.scheduler.notify(now_ms());
        }
    }

    pub fn set_frame_listener(&self, listener: Option<js_sys::Function>) {
        self.scheduler.set_listener(listener);
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn particles_ptr(&self) -> *const f32 {
        self.animation.with(|bg| bg.buffer().particles_ptr())
    }

    pub fn particle_count(&self) -> u32 {
        self.animation.with(|bg| bg.buffer().particle_count())
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.animation.with(|bg| bg.buffer().lines_ptr())
    }

    pub fn line_count(&self) -> u32 {
        self.animation.with(|bg| bg.buffer().line_count())
    }

    pub fn overlays_ptr(&self) -> *const f32 {
        self.animation.with(|bg| bg.buffer().overlays_ptr())
    }

    pub fn overlay_count(&self) -> u32 {
        self.animation.with(|bg| bg.buffer().overlay_count())
    }

    pub fn frame_count(&self) -> f64 {
        self.animation.with(|bg| bg.frame_count() as f64)
    }

    pub fn width(&self) -> f32 {
        self.animation.with(|bg| bg.bounds().width)
    }

    pub fn height(&self) -> f32 {
        self.animation.with(|bg| bg.bounds().height)
    }
}

/// `performance.now()`, matching the clock `requestAnimationFrame` reports.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

use glam::Vec2;
use crate::api::config::BackgroundConfig;
use crate::api::types::Bounds;
use crate::components::particle::Particle;
use crate::core::field::{ParticleField, SpawnParams};
use crate::core::rng::Rng;
use crate::core::scheduler::Animated;
use crate::core::time::FrameClock;
use crate::extensions::glyph_drift::{GlyphDrift, GLYPH_COUNT};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::RenderBuffer;
use crate::renderer::primitive::Frame;
use crate::systems::connections::{build_connections_grid, Connection};
use crate::systems::render::{render_into, RenderStyle};
use crate::systems::stepper::advance;

/// Whether frames are being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

/// Salt mixed into the seed for the glyph RNG so matrix digits do not
/// replay the placement sequence.
const GLYPH_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;
/// Salt for the ambient kanji layout.
const DRIFT_SEED_SALT: u64 = 0xC2B2_AE3D_27D4_EB4F;

/// One mounted particle background.
///
/// Host events go through the input queue and are applied at the start of
/// the next frame. Play state is set directly, since a paused background
/// runs no frames that could drain a queued resume.
pub struct Background {
    config: BackgroundConfig,
    style: RenderStyle,
    field: ParticleField,
    input: InputQueue,
    pointer: Option<Vec2>,
    state: PlayState,
    clock: FrameClock,
    glyph_rng: Rng,
    drift: Option<GlyphDrift>,
    connections: Vec<Connection>,
    frame: Frame,
    buffer: RenderBuffer,
    frames: u64,
}

impl Background {
    /// A background that has not been measured yet. It seeds itself on the
    /// first resize with area.
    pub fn new(config: BackgroundConfig) -> Self {
        let count = config.total_particles();
        let field = ParticleField::new(count, spawn_params(&config), config.seed);
        let state = if config.auto_play { PlayState::Running } else { PlayState::Paused };
        log::info!(
            "background created: {} particles, variant {}, {}",
            count,
            config.variant.as_str(),
            if state == PlayState::Running { "running" } else { "paused" }
        );
        Self {
            style: RenderStyle::from_config(&config),
            field,
            input: InputQueue::new(),
            pointer: None,
            state,
            clock: FrameClock::new(),
            glyph_rng: Rng::new(config.seed ^ GLYPH_SEED_SALT),
            drift: ambient_glyphs(&config),
            connections: Vec::new(),
            frame: Frame::default(),
            buffer: RenderBuffer::with_capacity(count),
            frames: 0,
            config,
        }
    }

    /// Create, seed against `bounds`, and draw the first frame so a paused
    /// background still shows its particles.
    pub fn mounted(config: BackgroundConfig, bounds: Bounds) -> Self {
        let mut bg = Self::new(config);
        bg.field.resize(bounds);
        bg.render();
        bg
    }

    // -- Host input --

    pub fn resize(&mut self, width: f32, height: f32) {
        self.input.push(InputEvent::Resize { width, height });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.push(InputEvent::PointerMove { x, y });
    }

    pub fn pointer_leave(&mut self) {
        self.input.push(InputEvent::PointerLeave);
    }

    // -- Play state --

    pub fn set_playing(&mut self, playing: bool) {
        let next = if playing { PlayState::Running } else { PlayState::Paused };
        if next == self.state {
            return;
        }
        if next == PlayState::Running {
            // Time spent paused does not count towards pulses.
            self.clock.resume();
        }
        self.state = next;
        log::debug!("background {:?}", next);
    }

    /// Flip the play state. Returns true when now running.
    pub fn toggle(&mut self) -> bool {
        self.set_playing(self.state == PlayState::Paused);
        self.is_running()
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlayState::Running
    }

    // -- Frame --

    /// Apply queued input. Returns true when anything changed.
    fn apply_input(&mut self) -> bool {
        let events = self.input.drain();
        let changed = !events.is_empty();
        for event in events {
            match event {
                InputEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
                InputEvent::PointerLeave => self.pointer = None,
                InputEvent::Resize { width, height } => {
                    self.field.resize(Bounds::new(width, height));
                }
            }
        }
        changed
    }

    /// Pointer as seen by the stepper and renderer: only in interactive mode.
    fn active_pointer(&self) -> Option<Vec2> {
        if self.config.interactive {
            self.pointer
        } else {
            None
        }
    }

    /// Drain input, then advance the particles once if running.
    pub fn update(&mut self) {
        self.apply_input();
        if self.state != PlayState::Running {
            return;
        }
        let next = advance(
            self.field.particles(),
            self.field.bounds(),
            self.config.direction,
            self.config.speed,
            self.active_pointer(),
        );
        self.field.replace(next);
        self.frames += 1;
    }

    /// Rebuild connections and drawables from the current particles and
    /// pack them into the render buffer.
    pub fn render(&mut self) {
        if self.config.connect_lines {
            self.connections = build_connections_grid(self.field.particles(), self.config.connection_distance);
        } else {
            self.connections.clear();
        }
        let pointer = self.active_pointer();
        render_into(
            &mut self.frame,
            self.field.particles(),
            &self.connections,
            &self.style,
            pointer,
            self.clock.elapsed(),
            &mut self.glyph_rng,
        );
        if let Some(drift) = &self.drift {
            let first_id = self.field.particles().len() as u32;
            drift.render_into(&mut self.frame, self.field.bounds(), self.clock.elapsed(), first_id);
        }
        self.buffer.pack(&self.frame);
    }

    /// One display frame at host timestamp `timestamp_ms`.
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.clock.tick(timestamp_ms);
        self.update();
        self.render();
    }

    /// Apply queued input and redraw without stepping. Lets a paused
    /// background follow resizes.
    pub fn refresh(&mut self) {
        if self.apply_input() {
            self.render();
        }
    }

    /// Swap in a new config. Count, size or speed changes re-seed the
    /// field; play state and seed are left as they are.
    pub fn reconfigure(&mut self, config: BackgroundConfig) {
        self.field.reconfigure(config.total_particles(), spawn_params(&config));
        self.style = RenderStyle::from_config(&config);
        if config.ambient_glyphs != self.drift.is_some() {
            self.drift = ambient_glyphs(&config);
        }
        self.config = config;
        self.render();
    }

    // -- Accessors --

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    pub fn bounds(&self) -> Bounds {
        self.field.bounds()
    }

    /// Last pointer position, whether or not the background is interactive.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frame
    }

    pub fn buffer(&self) -> &RenderBuffer {
        &self.buffer
    }

    /// Number of frames the particles have been stepped.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Seconds of running animation time.
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }
}

impl Animated for Background {
    fn on_frame(&mut self, timestamp_ms: f64) {
        self.frame(timestamp_ms);
    }

    fn is_running(&self) -> bool {
        Background::is_running(self)
    }
}

fn ambient_glyphs(config: &BackgroundConfig) -> Option<GlyphDrift> {
    config
        .ambient_glyphs
        .then(|| GlyphDrift::new(GLYPH_COUNT, config.seed ^ DRIFT_SEED_SALT))
}

fn spawn_params(config: &BackgroundConfig) -> SpawnParams {
    SpawnParams {
        speed: config.speed,
        base_size: config.particle_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{Direction, Variant};
    use crate::core::scheduler::{AnimationLoop, ManualScheduler};

    fn mounted(config: BackgroundConfig) -> Background {
        Background::mounted(config, Bounds::new(400.0, 300.0))
    }

    #[test]
    fn mount_seeds_and_draws() {
        let bg = mounted(BackgroundConfig::new().with_particle_count(20));
        assert_eq!(bg.particles().len(), 20);
        assert_eq!(bg.buffer().particle_count(), 20);
        // Four edge fades by default.
        assert_eq!(bg.buffer().overlay_count(), 4);
    }

    #[test]
    fn unmeasured_background_waits_for_resize() {
        let mut bg = Background::new(BackgroundConfig::new().with_particle_count(10));
        bg.frame(0.0);
        assert!(bg.particles().is_empty());
        bg.resize(100.0, 100.0);
        assert!(bg.particles().is_empty(), "resize applies on the next frame");
        bg.frame(16.0);
        assert_eq!(bg.particles().len(), 10);
    }

    #[test]
    fn auto_play_false_starts_paused() {
        let mut bg = mounted(BackgroundConfig::new().with_auto_play(false));
        assert_eq!(bg.state(), PlayState::Paused);
        let before = bg.particles().to_vec();
        bg.frame(0.0);
        bg.frame(16.0);
        assert_eq!(before, bg.particles());
        assert_eq!(bg.frame_count(), 0);
    }

    #[test]
    fn toggle_flips_state() {
        let mut bg = mounted(BackgroundConfig::new());
        assert!(bg.is_running());
        assert!(!bg.toggle());
        assert!(bg.toggle());
    }

    #[test]
    fn running_frames_step_particles() {
        let mut bg = mounted(BackgroundConfig::new().with_direction(Direction::Random));
        let before = bg.particles().to_vec();
        bg.frame(0.0);
        assert_eq!(bg.frame_count(), 1);
        assert_ne!(before, bg.particles());
        let b = bg.bounds();
        assert!(bg.particles().iter().all(|p| b.contains(p.pos)));
    }

    #[test]
    fn pointer_only_matters_when_interactive() {
        let config = BackgroundConfig::new().with_particle_count(30).with_speed(0.0);
        let mut passive = mounted(config.clone());
        let mut active = mounted(config.with_interactive(true));
        for bg in [&mut passive, &mut active] {
            bg.pointer_move(200.0, 150.0);
        }
        let positions = |bg: &Background| bg.particles().iter().map(|p| p.pos).collect::<Vec<_>>();
        let before = positions(&passive);
        passive.frame(0.0);
        active.frame(0.0);
        // Zero speed: only repulsion could move anything.
        assert_eq!(before, positions(&passive));
        assert_ne!(before, positions(&active));
        assert_eq!(passive.pointer(), Some(Vec2::new(200.0, 150.0)));
        assert_eq!(passive.buffer().overlay_count(), 4);
        // Cursor ring on top of the edge fades.
        assert_eq!(active.buffer().overlay_count(), 5);
    }

    #[test]
    fn pointer_leave_clears_pointer() {
        let mut bg = mounted(BackgroundConfig::new().with_interactive(true));
        bg.pointer_move(1.0, 1.0);
        bg.pointer_leave();
        bg.frame(0.0);
        assert_eq!(bg.pointer(), None);
    }

    #[test]
    fn connect_lines_fills_line_buffer() {
        let mut bg = mounted(
            BackgroundConfig::new()
                .with_particle_count(60)
                .with_connect_lines(true)
                .with_connection_distance(150.0),
        );
        bg.frame(0.0);
        assert!(!bg.connections().is_empty());
        assert_eq!(bg.buffer().line_count() as usize, bg.connections().len());

        let mut plain = mounted(BackgroundConfig::new().with_particle_count(60));
        plain.frame(0.0);
        assert!(plain.connections().is_empty());
        assert_eq!(plain.buffer().line_count(), 0);
    }

    #[test]
    fn tiny_connection_distance_renders() {
        let config =
            BackgroundConfig::from_json(r#"{"connectLines":true,"connectionDistance":1e-7}"#).unwrap();
        let mut bg = Background::mounted(config, Bounds::new(800.0, 600.0));
        bg.frame(0.0);
        bg.frame(16.0);
        assert!(bg.connections().is_empty());
        assert_eq!(bg.buffer().particle_count(), 50);
    }

    #[test]
    fn paused_refresh_follows_resize() {
        let mut bg = mounted(BackgroundConfig::new().with_auto_play(false).with_particle_count(8));
        bg.resize(50.0, 40.0);
        bg.refresh();
        assert_eq!(bg.bounds(), Bounds::new(50.0, 40.0));
        assert!(bg.particles().iter().all(|p| bg.bounds().contains(p.pos)));
        assert_eq!(bg.frame_count(), 0);
    }

    #[test]
    fn reconfigure_switches_variant_and_count() {
        let mut bg = mounted(BackgroundConfig::new());
        bg.reconfigure(BackgroundConfig::snow());
        assert_eq!(bg.particles().len(), 30);
        assert_eq!(bg.config().variant, Variant::Snow);
        assert_eq!(bg.buffer().particle_count(), 30);
    }

    #[test]
    fn japanese_preset_draws_drifting_kanji() {
        let mut bg = mounted(BackgroundConfig::japanese());
        assert!(bg.particles().is_empty());
        assert_eq!(bg.buffer().particle_count(), 20);
        assert_eq!(bg.buffer().overlay_count(), 0);
        let first = bg.current_frame().primitives.clone();
        // Past the longest start delay, so every glyph has left its rest pose.
        for i in 0..400 {
            bg.frame(i as f64 * 16.0);
        }
        assert!(bg.elapsed() > 6.0);
        assert_eq!(bg.buffer().particle_count(), 20);
        assert_ne!(first, bg.current_frame().primitives);

        bg.reconfigure(BackgroundConfig::snow());
        assert_eq!(bg.buffer().particle_count(), 30);
        bg.reconfigure(BackgroundConfig::snow().with_ambient_glyphs(true));
        assert_eq!(bg.buffer().particle_count(), 50);
        // Ambient ids follow the particle ids.
        assert_eq!(bg.current_frame().primitives[30].id(), crate::api::types::ParticleId(30));
    }

    #[test]
    fn paused_loop_schedules_nothing() {
        let sched = ManualScheduler::new();
        let lp = AnimationLoop::new(mounted(BackgroundConfig::new().with_auto_play(false)), sched.clone());
        lp.start();
        assert_eq!(sched.pending(), 0);
        lp.update(|bg| bg.set_playing(true));
        assert_eq!(sched.pending(), 1);
        sched.run_frame(16.0);
        assert_eq!(lp.with(|bg| bg.frame_count()), 1);
        lp.update(|bg| bg.set_playing(false));
        assert_eq!(sched.pending(), 0);
    }
}

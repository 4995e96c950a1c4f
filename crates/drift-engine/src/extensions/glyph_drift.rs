// extensions/glyph_drift.rs
//
// Ambient kanji that bob, sway and breathe behind the particles. Each glyph
// has a fixed anchor as a fraction of the container, so resizes move it
// with the layout. Time-driven: sample with the background's elapsed seconds.
//
// Usage:
//   let drift = GlyphDrift::new(GLYPH_COUNT, seed);
//   drift.render_into(&mut frame, bounds, elapsed, first_id);

use glam::Vec2;

use crate::api::types::{Bounds, ParticleId};
use crate::components::color::Rgba;
use crate::core::rng::Rng;
use crate::extensions::easing::{looping, Easing};
use crate::renderer::primitive::{Frame, Glyph, Primitive};

pub const GLYPH_COUNT: usize = 20;
/// Seconds for one bob/sway cycle.
pub const PERIOD_SECS: f32 = 8.0;
/// Start delays are uniform in [0, this).
pub const MAX_DELAY_SECS: f32 = 5.0;
pub const FONT_SIZE: f32 = 24.0;
/// Alpha of the glyph colour before the animated opacity applies.
pub const TEXT_ALPHA: f32 = 0.2;

const RISE: [f32; 3] = [0.0, -50.0, 0.0];
const OPACITY: [f32; 3] = [0.2, 0.6, 0.2];
/// Degrees.
const SWAY: [f32; 4] = [0.0, 10.0, -10.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftGlyph {
    pub glyph: Glyph,
    /// Rest position as a fraction of the container, each axis in [0, 1).
    pub anchor: Vec2,
    /// Seconds before this glyph starts moving.
    pub delay: f32,
}

/// One glyph sampled at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftState {
    pub glyph: Glyph,
    pub ch: char,
    pub center: Vec2,
    pub opacity: f32,
    /// Radians.
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDrift {
    glyphs: Vec<DriftGlyph>,
}

impl GlyphDrift {
    /// Scatter `count` random kanji with random anchors and delays.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let glyphs = (0..count)
            .map(|_| {
                let glyph = Glyph::KANJI[rng.next_int(Glyph::KANJI.len() as u32) as usize];
                let anchor = Vec2::new(rng.next_f32(), rng.next_f32());
                let delay = rng.next_f32() * MAX_DELAY_SECS;
                DriftGlyph { glyph, anchor, delay }
            })
            .collect();
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &[DriftGlyph] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Sample glyph `index` at `elapsed` seconds. Glyphs rest on their first
    /// keyframe until their delay has passed.
    pub fn sample(&self, index: usize, bounds: Bounds, elapsed: f32) -> Option<DriftState> {
        let g = self.glyphs.get(index)?;
        let t = (elapsed - g.delay).max(0.0);
        let rise = looping(&RISE, t, PERIOD_SECS, Easing::SineInOut);
        let rest = g.anchor * Vec2::new(bounds.width, bounds.height);
        Some(DriftState {
            glyph: g.glyph,
            ch: g.glyph.as_char(),
            center: rest + Vec2::new(0.0, rise),
            opacity: looping(&OPACITY, t, PERIOD_SECS, Easing::SineInOut),
            rotation: looping(&SWAY, t, PERIOD_SECS, Easing::SineInOut).to_radians(),
        })
    }

    /// Append every glyph to `frame` as primitives with ids from `first_id`.
    /// Nothing is drawn until the container has area.
    pub fn render_into(&self, frame: &mut Frame, bounds: Bounds, elapsed: f32, first_id: u32) {
        if !bounds.has_area() {
            return;
        }
        let color = Rgba::PURPLE_400.with_alpha(TEXT_ALPHA);
        for (i, id) in (0..self.glyphs.len()).zip(first_id..) {
            let Some(s) = self.sample(i, bounds, elapsed) else {
                continue;
            };
            frame.primitives.push(Primitive::Glyph {
                id: ParticleId(id),
                glyph: s.glyph,
                center: s.center,
                font_size: FONT_SIZE,
                rotation: s.rotation,
                color: color.fade(s.opacity),
            });
        }
    }
}

// extensions/mod.rs
//
// Optional presentation helpers that sit beside the particle background.
// The core uses the pulse curve in easing and the ambient glyph layer.

pub mod easing;
pub mod glyph_drift;
pub mod reveal;
pub mod typewriter;

pub use easing::{Easing, lerp, ease, keyframes, looping};
pub use glyph_drift::{DriftGlyph, DriftState, GlyphDrift};
pub use reveal::{Reveal, RevealState, FadeDirection, SlideDirection};
pub use typewriter::{TypeWriter, TypeWriterConfig, TypePhase, TypeEvent};

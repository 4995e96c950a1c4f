pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::background::{Background, PlayState};
pub use api::config::{BackgroundConfig, Density, Direction, Shape, Variant};
pub use api::types::{Bounds, ParticleId};
pub use components::color::Rgba;
pub use components::particle::Particle;
pub use core::field::{initialize, ParticleField, SpawnParams};
pub use core::rng::Rng;
pub use core::scheduler::{Animated, AnimationLoop, FrameCallback, FrameHandle, FrameScheduler, ManualScheduler};
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{LineInstance, OverlayInstance, ParticleInstance, RenderBuffer};
pub use renderer::primitive::{Frame, Glyph, Primitive};
pub use systems::connections::{build_connections, build_connections_grid, Connection};
pub use systems::render::{render, render_into, RenderStyle};
pub use systems::stepper::advance;

// Extensions - optional presentation helpers
pub use extensions::{
    Easing, lerp, ease,
    GlyphDrift, DriftGlyph, DriftState,
    Reveal, RevealState, FadeDirection, SlideDirection,
    TypeWriter, TypeWriterConfig, TypePhase, TypeEvent,
};

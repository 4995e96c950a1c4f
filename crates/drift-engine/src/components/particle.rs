//! A single decorative particle.

use glam::Vec2;
use crate::api::types::{Bounds, ParticleId};
use crate::core::rng::Rng;

/// A single particle with kinematic and visual state.
/// Value type: the field owns every particle and replaces them wholesale on re-seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    /// Container-local position.
    pub pos: Vec2,
    /// Per-step displacement before the direction policy is applied.
    pub vel: Vec2,
    pub size: f32,
    /// Fixed at creation, in [0.3, 1.0).
    pub opacity: f32,
    /// Rotation in radians.
    pub angle: f32,
    /// Radians added to `angle` every step.
    pub angular_vel: f32,
}

impl Particle {
    pub const SIZE_JITTER: f32 = 2.0;
    pub const MIN_OPACITY: f32 = 0.3;
    pub const ANGULAR_SPREAD: f32 = 0.02;

    /// Spawn a particle at a uniformly random point inside `bounds`, which must have area.
    pub fn random(id: ParticleId, bounds: Bounds, speed: f32, base_size: f32, rng: &mut Rng) -> Self {
        Particle {
            id,
            // wrap guards the product rounding up to the far edge
            pos: bounds.wrap(Vec2::new(rng.next_f32() * bounds.width, rng.next_f32() * bounds.height)),
            vel: Vec2::new(rng.centered(speed), rng.centered(speed)),
            size: base_size + rng.next_f32() * Self::SIZE_JITTER,
            opacity: Self::MIN_OPACITY + rng.next_f32() * (1.0 - Self::MIN_OPACITY),
            angle: rng.next_f32() * std::f32::consts::TAU,
            angular_vel: rng.centered(Self::ANGULAR_SPREAD),
        }
    }

    /// Euclidean distance to another particle.
    pub fn distance(&self, other: &Particle) -> f32 {
        self.pos.distance(other.pos)
    }
}

use crate::api::types::{Bounds, ParticleId};
use crate::components::particle::Particle;
use crate::core::rng::Rng;

/// Per-particle spawn parameters captured from the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub speed: f32,
    pub base_size: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self { speed: 1.0, base_size: 2.0 }
    }
}

/// Create `count` particles spread uniformly over `bounds`.
/// Bounds without area yield an empty set; callers defer seeding until the
/// container has been measured.
pub fn initialize(count: usize, bounds: Bounds, params: SpawnParams, rng: &mut Rng) -> Vec<Particle> {
    if !bounds.has_area() {
        return Vec::new();
    }
    (0..count)
        .map(|i| Particle::random(ParticleId(i as u32), bounds, params.speed, params.base_size, rng))
        .collect()
}

/// The particle collection plus the bounds it was seeded against.
/// Bounds and particles are only updated together through `&mut self`, so
/// a frame reads either the old pair or the re-seeded one.
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    count: usize,
    params: SpawnParams,
    rng: Rng,
}

impl ParticleField {
    /// An unseeded field. Seeds itself on the first `resize` with area.
    pub fn new(count: usize, params: SpawnParams, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(count),
            bounds: Bounds::ZERO,
            count,
            params,
            rng: Rng::new(seed),
        }
    }

    /// Create and seed a field in one go.
    pub fn seeded(count: usize, bounds: Bounds, params: SpawnParams, seed: u64) -> Self {
        let mut field = Self::new(count, params, seed);
        field.resize(bounds);
        field
    }

    /// Update the container size. Any change with area replaces every particle.
    /// Returns true when the field was re-seeded.
    pub fn resize(&mut self, bounds: Bounds) -> bool {
        if bounds == self.bounds && !self.needs_seed() {
            return false;
        }
        self.bounds = bounds;
        if !bounds.has_area() {
            // Collapsed container: the last particles stay put and the stepper idles.
            return false;
        }
        self.reseed();
        true
    }

    /// Change the particle count. Re-seeds when the count differs.
    pub fn set_count(&mut self, count: usize) -> bool {
        if count == self.count {
            return false;
        }
        self.count = count;
        if self.bounds.has_area() {
            self.reseed();
            return true;
        }
        false
    }

    /// Apply a new count and spawn parameters. Re-seeds when either changed.
    pub fn reconfigure(&mut self, count: usize, params: SpawnParams) -> bool {
        if count == self.count && params == self.params {
            return false;
        }
        self.count = count;
        self.params = params;
        if self.bounds.has_area() {
            self.reseed();
            return true;
        }
        false
    }

    pub fn params(&self) -> SpawnParams {
        self.params
    }

    fn needs_seed(&self) -> bool {
        self.bounds.has_area() && self.particles.len() != self.count
    }

    fn reseed(&mut self) {
        self.particles = initialize(self.count, self.bounds, self.params, &mut self.rng);
        log::debug!(
            "particle field seeded: {} particles in {}x{}",
            self.particles.len(),
            self.bounds.width,
            self.bounds.height
        );
    }

    /// Replace the particle set with the stepper's output. Bounds are unchanged.
    pub fn replace(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Configured particle count (the seeded length once bounds are known).
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

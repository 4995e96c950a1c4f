use glam::Vec2;

/// Stable index of a particle inside its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

/// Container dimensions in container-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds { width: 0.0, height: 0.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are known and positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Whether `p` lies in `[0, width) x [0, height)`.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }

    /// Toroidally wrap `p` into the bounds. Callers must check `has_area` first.
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    let w = v.rem_euclid(extent);
    // rem_euclid can round a tiny negative up to exactly `extent`
    if w >= extent { 0.0 } else { w }
}

//! Constellation lines between nearby particles.
//!
//! `build_connections` is the plain O(n²) scan used for the small counts a
//! background is configured with. `build_connections_grid` buckets particles
//! into cells just over `max_distance` wide and only compares neighbouring cells; it
//! yields exactly the same pairs, in the same order, for large fields.

use std::collections::HashMap;
use glam::Vec2;
use crate::components::particle::Particle;

/// Largest cell coordinate the grid builder indexes. Fields that would need
/// more cells than this per axis use the plain scan instead, which keeps
/// neighbour offsets well inside `i32`.
const MAX_CELL_INDEX: f32 = 1.0e9;

/// A derived line between two particles closer than the threshold.
/// Lives for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Storage index of the first particle (always the smaller index).
    pub a: usize,
    /// Storage index of the second particle.
    pub b: usize,
    pub from: Vec2,
    pub to: Vec2,
    pub distance: f32,
    /// `1 - distance / max_distance`, in (0, 1].
    pub opacity: f32,
}

#[inline]
fn connect(particles: &[Particle], i: usize, j: usize, max_distance: f32) -> Option<Connection> {
    let (a, b) = if i < j { (i, j) } else { (j, i) };
    let (pa, pb) = (particles[a].pos, particles[b].pos);
    let distance = pa.distance(pb);
    if distance < max_distance {
        Some(Connection {
            a,
            b,
            from: pa,
            to: pb,
            distance,
            opacity: 1.0 - distance / max_distance,
        })
    } else {
        None
    }
}

/// Every pair closer than `max_distance`, ordered by `(a, b)`.
pub fn build_connections(particles: &[Particle], max_distance: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    if max_distance <= 0.0 {
        return out;
    }
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            if let Some(c) = connect(particles, i, j, max_distance) {
                out.push(c);
            }
        }
    }
    out
}

/// Same result as `build_connections`, using a uniform grid of `max_distance`-sized cells.
pub fn build_connections_grid(particles: &[Particle], max_distance: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    if max_distance <= 0.0 || !max_distance.is_finite() {
        return out;
    }

    // Slightly oversized cells keep float rounding from putting a close pair two cells apart.
    let cell = max_distance * 1.001;
    let indexable = particles.iter().all(|p| {
        let (x, y) = (p.pos.x / cell, p.pos.y / cell);
        x.is_finite() && y.is_finite() && x.abs() < MAX_CELL_INDEX && y.abs() < MAX_CELL_INDEX
    });
    if !indexable {
        return build_connections(particles, max_distance);
    }
    let cell_of = |p: Vec2| -> (i32, i32) {
        ((p.x / cell).floor() as i32, (p.y / cell).floor() as i32)
    };

    let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
    for (i, p) in particles.iter().enumerate() {
        cells.entry(cell_of(p.pos)).or_default().push(i);
    }

    for (i, p) in particles.iter().enumerate() {
        let (cx, cy) = cell_of(p.pos);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &j in bucket {
                    if j <= i {
                        continue;
                    }
                    if let Some(c) = connect(particles, i, j, max_distance) {
                        out.push(c);
                    }
                }
            }
        }
    }

    out.sort_by_key(|c| (c.a, c.b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Bounds, ParticleId};
    use crate::core::field::{initialize, SpawnParams};
    use crate::core::rng::Rng;

    fn at(points: &[(f32, f32)]) -> Vec<Particle> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Particle {
                id: ParticleId(i as u32),
                pos: Vec2::new(x, y),
                vel: Vec2::ZERO,
                size: 2.0,
                opacity: 1.0,
                angle: 0.0,
                angular_vel: 0.0,
            })
            .collect()
    }

    #[test]
    fn connects_only_pairs_under_threshold() {
        let ps = at(&[(0.0, 0.0), (30.0, 40.0), (200.0, 0.0)]);
        let cs = build_connections(&ps, 100.0);
        assert_eq!(cs.len(), 1);
        assert_eq!((cs[0].a, cs[0].b), (0, 1));
        assert_eq!(cs[0].distance, 50.0);
        assert!((cs[0].opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn exact_threshold_is_excluded() {
        let ps = at(&[(0.0, 0.0), (100.0, 0.0)]);
        assert!(build_connections(&ps, 100.0).is_empty());
    }

    #[test]
    fn opacity_in_unit_range() {
        let ps = at(&[(0.0, 0.0), (0.0, 0.0), (99.9, 0.0)]);
        for c in build_connections(&ps, 100.0) {
            assert!(c.opacity > 0.0 && c.opacity <= 1.0, "opacity {}", c.opacity);
        }
    }

    #[test]
    fn symmetric_in_pair_order() {
        let ps = at(&[(10.0, 10.0), (60.0, 20.0)]);
        let rev = at(&[(60.0, 20.0), (10.0, 10.0)]);
        let a = build_connections(&ps, 100.0);
        let b = build_connections(&rev, 100.0);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(a[0].distance, b[0].distance);
        assert_eq!(a[0].opacity, b[0].opacity);
        assert_eq!(connect(&ps, 0, 1, 100.0), connect(&ps, 1, 0, 100.0));
    }

    #[test]
    fn non_positive_threshold_yields_nothing() {
        let ps = at(&[(0.0, 0.0), (0.0, 0.0)]);
        assert!(build_connections(&ps, 0.0).is_empty());
        assert!(build_connections_grid(&ps, -5.0).is_empty());
    }

    #[test]
    fn grid_matches_naive() {
        let mut rng = Rng::new(1234);
        let ps = initialize(400, Bounds::new(1000.0, 700.0), SpawnParams::default(), &mut rng);
        for max in [10.0, 45.5, 100.0, 350.0] {
            let naive = build_connections(&ps, max);
            let grid = build_connections_grid(&ps, max);
            assert_eq!(naive, grid, "mismatch at max_distance {}", max);
        }
    }

    #[test]
    fn grid_handles_tiny_threshold() {
        let mut rng = Rng::new(8);
        let mut ps = initialize(10, Bounds::new(800.0, 600.0), SpawnParams::default(), &mut rng);
        // Two coincident particles still connect at any positive threshold.
        ps[3].pos = ps[7].pos;
        for max in [1e-7, f32::MIN_POSITIVE] {
            let grid = build_connections_grid(&ps, max);
            assert_eq!(grid, build_connections(&ps, max));
            assert_eq!(grid.len(), 1);
            assert_eq!((grid[0].a, grid[0].b), (3, 7));
        }
    }
}

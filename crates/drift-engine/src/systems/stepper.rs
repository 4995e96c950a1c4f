//! Per-frame particle advance.

use glam::Vec2;
use crate::api::config::Direction;
use crate::api::types::Bounds;
use crate::components::particle::Particle;

/// Radius around the pointer inside which particles are pushed away.
pub const POINTER_RADIUS: f32 = 100.0;
/// Maximum positional nudge per step, reached as the distance approaches zero.
pub const POINTER_PUSH: f32 = 2.0;
/// Scale applied to the off-axis component under a directional policy.
pub const CROSS_AXIS_DAMPING: f32 = 0.3;

/// Displacement for one step under `direction`, before pointer repulsion.
pub fn displacement(vel: Vec2, direction: Direction, speed: f32) -> Vec2 {
    let v = vel * speed;
    match direction {
        Direction::Up => Vec2::new(v.x * CROSS_AXIS_DAMPING, v.y),
        Direction::Down => Vec2::new(v.x * CROSS_AXIS_DAMPING, -v.y),
        Direction::Left => Vec2::new(v.x, v.y * CROSS_AXIS_DAMPING),
        Direction::Right => Vec2::new(-v.x, v.y * CROSS_AXIS_DAMPING),
        Direction::Random => v,
    }
}

/// Positional push away from `pointer`, zero outside `POINTER_RADIUS`.
/// A particle exactly on the pointer has no direction to flee in and stays put.
pub fn repulsion(pos: Vec2, pointer: Vec2) -> Vec2 {
    let away = pos - pointer;
    let distance = away.length();
    if distance <= 0.0 || distance >= POINTER_RADIUS {
        return Vec2::ZERO;
    }
    let force = (POINTER_RADIUS - distance) / POINTER_RADIUS;
    away / distance * force * POINTER_PUSH
}

/// Advance every particle by one frame and return the new set.
///
/// Pure: the input is untouched and nothing is remembered between calls.
/// `pointer` is only `Some` in interactive mode. Velocities are never
/// renormalized. With zero-area bounds the call is a no-op and the input
/// set comes back unchanged.
pub fn advance(
    particles: &[Particle],
    bounds: Bounds,
    direction: Direction,
    speed: f32,
    pointer: Option<Vec2>,
) -> Vec<Particle> {
    if !bounds.has_area() {
        return particles.to_vec();
    }
    particles
        .iter()
        .map(|p| {
            let mut pos = p.pos + displacement(p.vel, direction, speed);
            if let Some(pointer) = pointer {
                pos += repulsion(pos, pointer);
            }
            Particle {
                pos: bounds.wrap(pos),
                angle: p.angle + p.angular_vel,
                ..p.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ParticleId;

    fn particle(pos: Vec2, vel: Vec2) -> Particle {
        Particle {
            id: ParticleId(0),
            pos,
            vel,
            size: 2.0,
            opacity: 1.0,
            angle: 0.0,
            angular_vel: 0.01,
        }
    }

    const BOUNDS: Bounds = Bounds { width: 200.0, height: 200.0 };

    #[test]
    fn down_keeps_vertical_and_damps_horizontal() {
        let p = particle(Vec2::new(100.0, 100.0), Vec2::new(0.4, 0.2));
        let out = advance(&[p], BOUNDS, Direction::Down, 1.0, None);
        let d = out[0].pos - Vec2::new(100.0, 100.0);
        assert!((d.x - 0.4 * 0.3).abs() < 1e-5, "dx = {}", d.x);
        assert!((d.y.abs() - 0.2).abs() < 1e-5, "dy = {}", d.y);
    }

    #[test]
    fn directional_policies() {
        let vel = Vec2::new(1.0, 2.0);
        assert_eq!(displacement(vel, Direction::Up, 1.0), Vec2::new(0.3, 2.0));
        assert_eq!(displacement(vel, Direction::Down, 1.0), Vec2::new(0.3, -2.0));
        assert_eq!(displacement(vel, Direction::Left, 1.0), Vec2::new(1.0, 2.0 * 0.3));
        assert_eq!(displacement(vel, Direction::Right, 1.0), Vec2::new(-1.0, 2.0 * 0.3));
        assert_eq!(displacement(vel, Direction::Random, 2.0), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn pointer_pushes_nearby_particle_away() {
        let p = particle(Vec2::new(51.0, 50.0), Vec2::ZERO);
        let out = advance(&[p], BOUNDS, Direction::Random, 1.0, Some(Vec2::new(50.0, 50.0)));
        assert!(out[0].pos.x > 51.0, "x = {}", out[0].pos.x);
        assert!((out[0].pos.y - 50.0).abs() < 1e-5);
        // force at distance 1 is 0.99, nudge is twice that
        assert!((out[0].pos.x - (51.0 + 0.99 * 2.0)).abs() < 1e-4);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let p = particle(Vec2::new(150.0, 50.0), Vec2::ZERO);
        let out = advance(&[p.clone()], BOUNDS, Direction::Random, 1.0, Some(Vec2::new(50.0, 50.0)));
        assert_eq!(out[0].pos, p.pos);
    }

    #[test]
    fn pointer_on_particle_does_not_produce_nan() {
        let p = particle(Vec2::new(50.0, 50.0), Vec2::ZERO);
        let out = advance(&[p], BOUNDS, Direction::Random, 1.0, Some(Vec2::new(50.0, 50.0)));
        assert_eq!(out[0].pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn repulsion_does_not_touch_velocity() {
        let p = particle(Vec2::new(51.0, 50.0), Vec2::new(0.1, 0.1));
        let out = advance(&[p.clone()], BOUNDS, Direction::Random, 1.0, Some(Vec2::new(50.0, 50.0)));
        assert_eq!(out[0].vel, p.vel);
    }

    #[test]
    fn angle_advances_unconditionally() {
        let p = particle(Vec2::new(10.0, 10.0), Vec2::ZERO);
        let out = advance(&[p], BOUNDS, Direction::Up, 0.0, None);
        assert!((out[0].angle - 0.01).abs() < 1e-7);
    }

    #[test]
    fn wraps_toroidally() {
        let p = particle(Vec2::new(199.9, 0.05), Vec2::new(0.5, -0.5));
        let out = advance(&[p], BOUNDS, Direction::Random, 1.0, None);
        assert!(BOUNDS.contains(out[0].pos), "pos = {:?}", out[0].pos);
        assert!(out[0].pos.x < 1.0);
        assert!(out[0].pos.y > 199.0);
    }

    #[test]
    fn zero_bounds_leave_positions_unchanged() {
        let p = particle(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0));
        for bounds in [Bounds::new(0.0, 100.0), Bounds::new(100.0, 0.0), Bounds::ZERO] {
            let out = advance(&[p.clone()], bounds, Direction::Random, 1.0, Some(Vec2::ZERO));
            assert_eq!(out[0].pos, p.pos);
        }
    }

    #[test]
    fn input_is_not_mutated_and_calls_are_repeatable() {
        let ps = vec![
            particle(Vec2::new(10.0, 10.0), Vec2::new(0.3, -0.2)),
            particle(Vec2::new(90.0, 40.0), Vec2::new(-0.1, 0.4)),
        ];
        let snapshot = ps.clone();
        let a = advance(&ps, BOUNDS, Direction::Left, 1.5, Some(Vec2::new(12.0, 12.0)));
        let b = advance(&ps, BOUNDS, Direction::Left, 1.5, Some(Vec2::new(12.0, 12.0)));
        assert_eq!(ps, snapshot);
        assert_eq!(a, b);
    }
}

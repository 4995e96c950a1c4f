use glam::Vec2;
use crate::api::config::{BackgroundConfig, Shape, Variant};
use crate::components::color::Rgba;
use crate::components::particle::Particle;
use crate::core::rng::Rng;
use crate::extensions::easing::{looping, Easing};
use crate::renderer::primitive::{Edge, Frame, Glyph, LineSegment, Overlay, Primitive, ShapeKind};
use crate::systems::connections::Connection;

/// Corner radius of square particles.
pub const SQUARE_CORNER_RADIUS: f32 = 2.0;
/// Font size of matrix digits.
pub const MATRIX_FONT_SIZE: f32 = 12.0;
/// Alpha multiplier applied to connection opacity.
pub const LINE_ALPHA: f32 = 0.3;
pub const LINE_WIDTH: f32 = 1.0;
/// Depth of each edge fade gradient.
pub const EDGE_FADE_DEPTH: f32 = 80.0;
pub const EDGE_FADE_ALPHA: f32 = 0.8;
pub const CURSOR_RING_DIAMETER: f32 = 100.0;
pub const CURSOR_RING_ALPHA: f32 = 0.3;
/// Scale keyframes and period (seconds) shared by bubbles and the cursor ring.
pub const PULSE_KEYFRAMES: [f32; 3] = [1.0, 1.2, 1.0];
pub const PULSE_PERIOD: f32 = 2.0;

/// The subset of config the renderer reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub shape: Shape,
    pub variant: Variant,
    pub color: Rgba,
    pub fade_edges: bool,
    pub cursor_ring: bool,
}

impl RenderStyle {
    pub fn from_config(config: &BackgroundConfig) -> Self {
        Self {
            shape: config.shape,
            variant: config.variant,
            color: config.color(),
            fade_edges: config.fade_edges,
            cursor_ring: config.interactive,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&BackgroundConfig::default())
    }
}

/// Scale of a looping 1 → 1.2 → 1 pulse at `elapsed` seconds.
pub fn pulse_scale(elapsed: f32) -> f32 {
    looping(&PULSE_KEYFRAMES, elapsed, PULSE_PERIOD, Easing::SineInOut)
}

/// Floating-variant primitive for one particle.
fn shape_primitive(p: &Particle, shape: Shape, color: Rgba) -> Primitive {
    let color = color.fade(p.opacity);
    match shape {
        Shape::Circle => Primitive::Shape {
            id: p.id,
            kind: ShapeKind::Circle,
            center: p.pos,
            size: p.size,
            rotation: p.angle,
            color,
        },
        Shape::Square => Primitive::Shape {
            id: p.id,
            kind: ShapeKind::RoundedSquare { corner_radius: SQUARE_CORNER_RADIUS },
            center: p.pos,
            size: p.size,
            rotation: p.angle,
            color,
        },
        Shape::Triangle => Primitive::Shape {
            id: p.id,
            kind: ShapeKind::Triangle,
            center: p.pos,
            size: p.size,
            rotation: p.angle,
            color,
        },
        Shape::Star => Primitive::Glyph {
            id: p.id,
            glyph: Glyph::Star,
            center: p.pos,
            font_size: p.size,
            rotation: p.angle,
            color,
        },
    }
}

fn variant_primitive(p: &Particle, style: &RenderStyle, pulse: f32, rng: &mut Rng) -> Primitive {
    match style.variant {
        Variant::Floating => shape_primitive(p, style.shape, style.color),
        Variant::Matrix => Primitive::Glyph {
            id: p.id,
            glyph: if rng.chance(0.5) { Glyph::One } else { Glyph::Zero },
            center: p.pos,
            font_size: MATRIX_FONT_SIZE,
            rotation: 0.0,
            color: Rgba::MATRIX_GREEN.fade(p.opacity),
        },
        Variant::Snow => Primitive::Glyph {
            id: p.id,
            glyph: Glyph::Snowflake,
            center: p.pos,
            font_size: p.size * 2.0,
            rotation: 0.0,
            color: Rgba::WHITE.fade(p.opacity),
        },
        Variant::Bubbles => Primitive::Ring {
            id: p.id,
            center: p.pos,
            diameter: p.size * 3.0,
            stroke_width: 1.0,
            scale: pulse,
            color: style.color.fade(p.opacity * 0.5),
        },
    }
}

/// Map particles and connections to drawables, reusing `frame`'s allocations.
///
/// Never touches the particle set. `rng` only feeds the matrix digits and
/// `elapsed` (seconds) only drives pulses.
pub fn render_into(
    frame: &mut Frame,
    particles: &[Particle],
    connections: &[Connection],
    style: &RenderStyle,
    pointer: Option<Vec2>,
    elapsed: f32,
    rng: &mut Rng,
) {
    frame.clear();
    let pulse = pulse_scale(elapsed);

    frame.lines.extend(connections.iter().map(|c| LineSegment {
        from: c.from,
        to: c.to,
        width: LINE_WIDTH,
        color: style.color.fade(c.opacity * LINE_ALPHA),
    }));

    frame
        .primitives
        .extend(particles.iter().map(|p| variant_primitive(p, style, pulse, rng)));

    if style.fade_edges {
        let color = Rgba::SLATE_900.with_alpha(EDGE_FADE_ALPHA);
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            frame.overlays.push(Overlay::EdgeFade { edge, depth: EDGE_FADE_DEPTH, color });
        }
    }

    if style.cursor_ring {
        if let Some(center) = pointer {
            frame.overlays.push(Overlay::CursorRing {
                center,
                diameter: CURSOR_RING_DIAMETER,
                scale: pulse,
                color: Rgba::PURPLE.with_alpha(CURSOR_RING_ALPHA),
            });
        }
    }
}

/// Allocating convenience wrapper around `render_into`.
pub fn render(
    particles: &[Particle],
    connections: &[Connection],
    style: &RenderStyle,
    pointer: Option<Vec2>,
    elapsed: f32,
    rng: &mut Rng,
) -> Frame {
    let mut frame = Frame::default();
    render_into(&mut frame, particles, connections, style, pointer, elapsed, rng);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Bounds, ParticleId};
    use crate::core::field::{initialize, SpawnParams};
    use crate::systems::connections::build_connections;

    fn field(n: usize) -> Vec<Particle> {
        let mut rng = Rng::new(9);
        initialize(n, Bounds::new(300.0, 300.0), SpawnParams::default(), &mut rng)
    }

    fn style(shape: Shape, variant: Variant) -> RenderStyle {
        RenderStyle {
            shape,
            variant,
            color: Rgba::PURPLE,
            fade_edges: false,
            cursor_ring: false,
        }
    }

    #[test]
    fn one_primitive_per_particle_in_order() {
        let ps = field(12);
        let frame = render(&ps, &[], &style(Shape::Circle, Variant::Floating), None, 0.0, &mut Rng::new(1));
        assert_eq!(frame.primitives.len(), 12);
        for (p, prim) in ps.iter().zip(&frame.primitives) {
            assert_eq!(prim.id(), p.id);
            assert_eq!(prim.center(), p.pos);
        }
    }

    #[test]
    fn shapes_dispatch() {
        let ps = field(1);
        let mut rng = Rng::new(1);
        let kind = |shape| match render(&ps, &[], &style(shape, Variant::Floating), None, 0.0, &mut Rng::new(1)).primitives[0] {
            Primitive::Shape { kind, .. } => Some(kind),
            _ => None,
        };
        assert_eq!(kind(Shape::Circle), Some(ShapeKind::Circle));
        assert_eq!(kind(Shape::Square), Some(ShapeKind::RoundedSquare { corner_radius: 2.0 }));
        assert_eq!(kind(Shape::Triangle), Some(ShapeKind::Triangle));
        let star = render(&ps, &[], &style(Shape::Star, Variant::Floating), None, 0.0, &mut rng);
        assert!(matches!(star.primitives[0], Primitive::Glyph { glyph: Glyph::Star, .. }));
    }

    #[test]
    fn shape_carries_rotation_size_and_opacity() {
        let ps = field(1);
        let frame = render(&ps, &[], &style(Shape::Square, Variant::Floating), None, 0.0, &mut Rng::new(1));
        match frame.primitives[0] {
            Primitive::Shape { size, rotation, color, .. } => {
                assert_eq!(size, ps[0].size);
                assert_eq!(rotation, ps[0].angle);
                assert!((color.a - ps[0].opacity).abs() < 1e-6);
            }
            other => panic!("expected shape, got {:?}", other),
        }
    }

    #[test]
    fn matrix_ignores_shape_and_draws_digits() {
        let ps = field(50);
        let frame = render(&ps, &[], &style(Shape::Triangle, Variant::Matrix), None, 0.0, &mut Rng::new(3));
        let mut seen = (false, false);
        for prim in &frame.primitives {
            match *prim {
                Primitive::Glyph { glyph: Glyph::Zero, color, .. } => {
                    seen.0 = true;
                    assert_eq!(color.g, Rgba::MATRIX_GREEN.g);
                }
                Primitive::Glyph { glyph: Glyph::One, .. } => seen.1 = true,
                ref other => panic!("unexpected {:?}", other),
            }
        }
        assert!(seen.0 && seen.1, "expected both digits in 50 draws");
    }

    #[test]
    fn snow_and_bubbles_variants() {
        let ps = field(1);
        let snow = render(&ps, &[], &style(Shape::Square, Variant::Snow), None, 0.0, &mut Rng::new(1));
        match snow.primitives[0] {
            Primitive::Glyph { glyph, font_size, .. } => {
                assert_eq!(glyph, Glyph::Snowflake);
                assert_eq!(font_size, ps[0].size * 2.0);
            }
            other => panic!("expected glyph, got {:?}", other),
        }
        let bubbles = render(&ps, &[], &style(Shape::Star, Variant::Bubbles), None, 0.5, &mut Rng::new(1));
        match bubbles.primitives[0] {
            Primitive::Ring { diameter, scale, color, .. } => {
                assert_eq!(diameter, ps[0].size * 3.0);
                assert!(scale > 1.0 && scale <= 1.2);
                assert!((color.a - ps[0].opacity * 0.5).abs() < 1e-6);
            }
            other => panic!("expected ring, got {:?}", other),
        }
    }

    #[test]
    fn connection_lines_use_scaled_opacity() {
        let ps = field(40);
        let cs = build_connections(&ps, 120.0);
        assert!(!cs.is_empty());
        let frame = render(&ps, &cs, &style(Shape::Circle, Variant::Floating), None, 0.0, &mut Rng::new(1));
        assert_eq!(frame.lines.len(), cs.len());
        for (line, c) in frame.lines.iter().zip(&cs) {
            assert_eq!(line.from, c.from);
            assert!((line.color.a - c.opacity * 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn overlays_follow_style() {
        let ps = field(3);
        let mut s = style(Shape::Circle, Variant::Floating);
        s.fade_edges = true;
        s.cursor_ring = true;
        let with_pointer = render(&ps, &[], &s, Some(Vec2::new(10.0, 10.0)), 0.0, &mut Rng::new(1));
        assert_eq!(with_pointer.overlays.len(), 5);
        let without_pointer = render(&ps, &[], &s, None, 0.0, &mut Rng::new(1));
        assert_eq!(without_pointer.overlays.len(), 4);
    }

    #[test]
    fn render_does_not_mutate_particles() {
        let ps = field(20);
        let snapshot = ps.clone();
        let cs = build_connections(&ps, 100.0);
        for variant in Variant::ALL {
            let _ = render(&ps, &cs, &style(Shape::Star, *variant), None, 1.3, &mut Rng::new(5));
        }
        assert_eq!(ps, snapshot);
    }

    #[test]
    fn render_into_reuses_frame() {
        let ps = field(5);
        let mut frame = render(&ps, &[], &style(Shape::Circle, Variant::Floating), None, 0.0, &mut Rng::new(1));
        render_into(&mut frame, &ps[..2], &[], &style(Shape::Circle, Variant::Floating), None, 0.0, &mut Rng::new(1));
        assert_eq!(frame.primitives.len(), 2);
        assert_eq!(frame.primitives[1].id(), ParticleId(1));
    }

    #[test]
    fn pulse_period() {
        assert!((pulse_scale(0.0) - 1.0).abs() < 1e-6);
        assert!((pulse_scale(1.0) - 1.2).abs() < 1e-6);
        assert!((pulse_scale(2.0) - 1.0).abs() < 1e-6);
    }
}

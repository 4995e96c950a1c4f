use bytemuck::{Pod, Zeroable};
use super::primitive::{Frame, LineSegment, Overlay, Primitive, ShapeKind};

/// Primitive kind codes written into `ParticleInstance::kind`.
/// Must match the host painter.
pub const KIND_CIRCLE: f32 = 0.0;
pub const KIND_ROUNDED_SQUARE: f32 = 1.0;
pub const KIND_TRIANGLE: f32 = 2.0;
pub const KIND_GLYPH: f32 = 3.0;
pub const KIND_RING: f32 = 4.0;

/// Overlay kind codes written into `OverlayInstance::kind`.
pub const OVERLAY_EDGE_FADE: f32 = 0.0;
pub const OVERLAY_CURSOR_RING: f32 = 1.0;

/// Per-particle draw data read by the host painter.
/// 12 floats = 48 bytes per instance.
///
/// `param` is kind-specific: corner radius for rounded squares, glyph code
/// for glyphs, stroke width for rings.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    /// Shape size, glyph font size, or ring diameter.
    pub size: f32,
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub kind: f32,
    pub param: f32,
    pub scale: f32,
    pub _pad0: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_primitive(p: &Primitive) -> Self {
        let c = p.color();
        let base = ParticleInstance {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
            scale: 1.0,
            ..Default::default()
        };
        match *p {
            Primitive::Shape { kind, center, size, rotation, .. } => {
                let (kind, param) = match kind {
                    ShapeKind::Circle => (KIND_CIRCLE, 0.0),
                    ShapeKind::RoundedSquare { corner_radius } => (KIND_ROUNDED_SQUARE, corner_radius),
                    ShapeKind::Triangle => (KIND_TRIANGLE, 0.0),
                };
                ParticleInstance { x: center.x, y: center.y, size, rotation, kind, param, ..base }
            }
            Primitive::Glyph { glyph, center, font_size, rotation, .. } => ParticleInstance {
                x: center.x,
                y: center.y,
                size: font_size,
                rotation,
                kind: KIND_GLYPH,
                param: glyph as u8 as f32,
                ..base
            },
            Primitive::Ring { center, diameter, stroke_width, scale, .. } => ParticleInstance {
                x: center.x,
                y: center.y,
                size: diameter,
                kind: KIND_RING,
                param: stroke_width,
                scale,
                ..base
            },
        }
    }
}

/// Per-line draw data. 12 floats = 48 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub _pad0: f32,
    pub _pad1: f32,
    pub _pad2: f32,
}

impl LineInstance {
    pub const FLOATS: usize = 12;

    pub fn from_segment(l: &LineSegment) -> Self {
        LineInstance {
            x1: l.from.x,
            y1: l.from.y,
            x2: l.to.x,
            y2: l.to.y,
            width: l.width,
            r: l.color.r,
            g: l.color.g,
            b: l.color.b,
            a: l.color.a,
            ..Default::default()
        }
    }
}

/// Per-overlay draw data. 12 floats = 48 bytes.
///
/// Edge fades use `param` for the edge code and `size` for the depth;
/// cursor rings use `x`/`y`, `size` for the diameter and `scale`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OverlayInstance {
    pub kind: f32,
    pub param: f32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub scale: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl OverlayInstance {
    pub const FLOATS: usize = 12;

    pub fn from_overlay(o: &Overlay) -> Self {
        match *o {
            Overlay::EdgeFade { edge, depth, color } => OverlayInstance {
                kind: OVERLAY_EDGE_FADE,
                param: edge as u8 as f32,
                size: depth,
                scale: 1.0,
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
                ..Default::default()
            },
            Overlay::CursorRing { center, diameter, scale, color } => OverlayInstance {
                kind: OVERLAY_CURSOR_RING,
                x: center.x,
                y: center.y,
                size: diameter,
                scale,
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
                ..Default::default()
            },
        }
    }
}

/// Flat buffers the host reads by pointer after each frame.
pub struct RenderBuffer {
    pub particles: Vec<ParticleInstance>,
    pub lines: Vec<LineInstance>,
    pub overlays: Vec<OverlayInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            lines: Vec::with_capacity(max_particles * 2),
            overlays: Vec::with_capacity(8),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.lines.clear();
        self.overlays.clear();
    }

    /// Replace the buffer contents with `frame`.
    pub fn pack(&mut self, frame: &Frame) {
        self.clear();
        self.lines.extend(frame.lines.iter().map(LineInstance::from_segment));
        self.particles.extend(frame.primitives.iter().map(ParticleInstance::from_primitive));
        self.overlays.extend(frame.overlays.iter().map(OverlayInstance::from_overlay));
    }

    pub fn particle_count(&self) -> u32 {
        self.particles.len() as u32
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn overlay_count(&self) -> u32 {
        self.overlays.len() as u32
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.particles.as_ptr() as *const f32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }

    pub fn overlays_ptr(&self) -> *const f32 {
        self.overlays.as_ptr() as *const f32
    }

    /// Particle instances as a flat float slice.
    pub fn particle_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

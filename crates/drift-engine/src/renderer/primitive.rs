//! Drawable primitives handed to the host presentation layer.

use glam::Vec2;
use crate::api::types::ParticleId;
use crate::components::color::Rgba;

/// Text glyphs drawn instead of shapes. The discriminant is the code
/// packed into instance buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Glyph {
    Zero = 0,
    One,
    Snowflake,
    Star,
    /// 桜
    Sakura,
    /// 雪
    Yuki,
    /// 星
    Hoshi,
    /// 月
    Tsuki,
    /// 花
    Hana,
    /// 雲
    Kumo,
    /// 風
    Kaze,
    /// 水
    Mizu,
}

impl Glyph {
    /// Every glyph, indexed by code.
    pub const ALL: [Glyph; 12] = [
        Glyph::Zero,
        Glyph::One,
        Glyph::Snowflake,
        Glyph::Star,
        Glyph::Sakura,
        Glyph::Yuki,
        Glyph::Hoshi,
        Glyph::Tsuki,
        Glyph::Hana,
        Glyph::Kumo,
        Glyph::Kaze,
        Glyph::Mizu,
    ];

    /// Kanji used by the ambient glyph layer.
    pub const KANJI: [Glyph; 8] = [
        Glyph::Sakura,
        Glyph::Yuki,
        Glyph::Hoshi,
        Glyph::Tsuki,
        Glyph::Hana,
        Glyph::Kumo,
        Glyph::Kaze,
        Glyph::Mizu,
    ];

    pub fn as_char(self) -> char {
        match self {
            Glyph::Zero => '0',
            Glyph::One => '1',
            Glyph::Snowflake => '❄',
            Glyph::Star => '★',
            Glyph::Sakura => '桜',
            Glyph::Yuki => '雪',
            Glyph::Hoshi => '星',
            Glyph::Tsuki => '月',
            Glyph::Hana => '花',
            Glyph::Kumo => '雲',
            Glyph::Kaze => '風',
            Glyph::Mizu => '水',
        }
    }

    /// Inverse of `glyph as u8`.
    pub fn from_code(code: u8) -> Option<Glyph> {
        Self::ALL.get(code as usize).copied()
    }
}

/// Filled shapes a particle can be drawn as. All are centered on the particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Circle,
    /// Square with rounded corners of the given radius.
    RoundedSquare { corner_radius: f32 },
    /// Isosceles triangle, apex up, base and height both `size`.
    Triangle,
}

/// One particle's drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Filled shape of width/height `size`, rotated by `rotation` radians.
    Shape {
        id: ParticleId,
        kind: ShapeKind,
        center: Vec2,
        size: f32,
        rotation: f32,
        color: Rgba,
    },
    /// Text glyph with the given font size.
    Glyph {
        id: ParticleId,
        glyph: Glyph,
        center: Vec2,
        font_size: f32,
        rotation: f32,
        color: Rgba,
    },
    /// Stroked circle outline, scaled by `scale` around its center.
    Ring {
        id: ParticleId,
        center: Vec2,
        diameter: f32,
        stroke_width: f32,
        scale: f32,
        color: Rgba,
    },
}

impl Primitive {
    pub fn id(&self) -> ParticleId {
        match *self {
            Primitive::Shape { id, .. } | Primitive::Glyph { id, .. } | Primitive::Ring { id, .. } => id,
        }
    }

    pub fn center(&self) -> Vec2 {
        match *self {
            Primitive::Shape { center, .. }
            | Primitive::Glyph { center, .. }
            | Primitive::Ring { center, .. } => center,
        }
    }

    pub fn color(&self) -> Rgba {
        match *self {
            Primitive::Shape { color, .. }
            | Primitive::Glyph { color, .. }
            | Primitive::Ring { color, .. } => color,
        }
    }
}

/// A stroked constellation line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Rgba,
}

/// Edge a fade gradient is anchored to; the gradient runs inward from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Edge {
    Top = 0,
    Bottom,
    Left,
    Right,
}

/// Static decorations drawn above the particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    /// Linear gradient from `color` at `edge` to transparent `depth` units inward.
    EdgeFade { edge: Edge, depth: f32, color: Rgba },
    /// Pulsing outline that follows the pointer.
    CursorRing { center: Vec2, diameter: f32, scale: f32, color: Rgba },
}

/// Everything drawn for one frame, back to front: lines, particles, overlays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub lines: Vec<LineSegment>,
    pub primitives: Vec<Primitive>,
    pub overlays: Vec<Overlay>,
}

impl Frame {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.primitives.clear();
        self.overlays.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.primitives.is_empty() && self.overlays.is_empty()
    }
}

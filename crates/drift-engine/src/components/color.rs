/// Straight-alpha RGBA color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Tailwind purple-500, the default particle color.
    pub const PURPLE: Rgba = Rgba::new(168.0 / 255.0, 85.0 / 255.0, 247.0 / 255.0, 1.0);
    /// Tailwind purple-400, used by the ambient kanji.
    pub const PURPLE_400: Rgba = Rgba::new(192.0 / 255.0, 132.0 / 255.0, 252.0 / 255.0, 1.0);
    /// Tailwind green-400, used by the matrix variant.
    pub const MATRIX_GREEN: Rgba = Rgba::new(74.0 / 255.0, 222.0 / 255.0, 128.0 / 255.0, 1.0);
    /// Tailwind slate-900, the page background the edge fades blend into.
    pub const SLATE_900: Rgba = Rgba::new(15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiply alpha by `factor`, clamped to [0, 1].
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha((self.a * factor).clamp(0.0, 1.0))
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (a single leading `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        // from_str_radix alone would accept a sign
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
        match hex.len() {
            3 => Some(Self::rgb8(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f32 / 255.0)),
            _ => None,
        }
    }

    /// Parse a hex color, falling back to `fallback` with a warning.
    pub fn parse_or(s: &str, fallback: Rgba) -> Self {
        Self::parse_hex(s).unwrap_or_else(|| {
            log::warn!("unrecognised color {:?}, using {}", s, fallback.to_hex());
            fallback
        })
    }

    pub fn to_hex(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b), c(self.a))
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::PURPLE
    }
}

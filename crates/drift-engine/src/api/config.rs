use serde::{Deserialize, Serialize};
use crate::components::color::Rgba;

/// Declares a string-tagged enum whose unknown tags fall back to the default variant.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)? }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $tag ),+
                }
            }

            /// Look up a tag; unknown tags map to the default variant.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $( $tag => $name::$variant, )+
                    other => {
                        log::debug!("unknown {} {:?}, using {}", stringify!($name), other, $name::$default.as_str());
                        $name::$default
                    }
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_name(&s)
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_str().to_owned()
            }
        }
    };
}

named_enum! {
    /// Particle count multiplier.
    Density {
        Low => "low",
        Medium => "medium",
        High => "high",
        Ultra => "ultra",
    }
    default Medium
}

impl Density {
    pub fn multiplier(self) -> f32 {
        match self {
            Density::Low => 0.5,
            Density::Medium => 1.0,
            Density::High => 1.5,
            Density::Ultra => 2.0,
        }
    }
}

named_enum! {
    /// Direction policy applied by the stepper.
    Direction {
        Up => "up",
        Down => "down",
        Left => "left",
        Right => "right",
        /// Raw velocity, no axis bias.
        Random => "random",
    }
    default Up
}

named_enum! {
    /// Per-particle primitive for the floating variant.
    Shape {
        Circle => "circle",
        Square => "square",
        Triangle => "triangle",
        Star => "star",
    }
    default Circle
}

named_enum! {
    /// Rendering mode; every variant except floating ignores `Shape`.
    Variant {
        Floating => "floating",
        Matrix => "matrix",
        Snow => "snow",
        Bubbles => "bubbles",
    }
    default Floating
}

/// Configuration for a particle background. Field names follow the
/// camelCase JSON the host page passes in; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
    /// Base particle count before density scaling (default: 50).
    pub particle_count: u32,
    /// Base particle size; each particle adds up to 2 units of jitter (default: 2).
    pub particle_size: f32,
    /// Hex color for particles and connection lines (default: `#a855f7`).
    pub particle_color: String,
    /// Velocity scalar (default: 1).
    pub speed: f32,
    pub direction: Direction,
    /// Pointer repulsion and cursor ring.
    pub interactive: bool,
    /// Build and draw constellation lines.
    pub connect_lines: bool,
    /// Connection threshold distance (default: 100).
    pub connection_distance: f32,
    /// Gradient masks along the container edges.
    pub fade_edges: bool,
    /// Start running; when false the background starts paused.
    pub auto_play: bool,
    /// Faint drifting kanji behind the particles.
    pub ambient_glyphs: bool,
    pub density: Density,
    pub shape: Shape,
    pub variant: Variant,
    /// RNG seed for particle placement and matrix glyphs.
    pub seed: u64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            particle_size: 2.0,
            particle_color: "#a855f7".to_owned(),
            speed: 1.0,
            direction: Direction::Up,
            interactive: false,
            connect_lines: false,
            connection_distance: 100.0,
            fade_edges: true,
            auto_play: true,
            ambient_glyphs: false,
            density: Density::Medium,
            shape: Shape::Circle,
            variant: Variant::Floating,
            seed: 42,
        }
    }
}

impl BackgroundConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Particle count after density scaling.
    pub fn total_particles(&self) -> usize {
        (self.particle_count as f32 * self.density.multiplier()).floor() as usize
    }

    /// Resolved particle color; invalid strings fall back to purple.
    pub fn color(&self) -> Rgba {
        Rgba::parse_or(&self.particle_color, Rgba::PURPLE)
    }

    // -- Presets --

    /// Look up a preset by name: `matrix`, `snow`, `bubbles`, `floating` or `japanese`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "japanese" => Some(Self::japanese()),
            "matrix" => Some(Self::matrix()),
            "snow" => Some(Self::snow()),
            "bubbles" => Some(Self::bubbles()),
            "floating" => Some(Self::floating()),
            _ => None,
        }
    }

    /// Falling binary digits.
    pub fn matrix() -> Self {
        Self::new()
            .with_variant(Variant::Matrix)
            .with_particle_count(100)
            .with_speed(2.0)
            .with_direction(Direction::Down)
            .with_color("#00ff41")
            .with_shape(Shape::Square)
    }

    /// Slow snowflakes.
    pub fn snow() -> Self {
        Self::new()
            .with_variant(Variant::Snow)
            .with_particle_count(30)
            .with_speed(0.5)
            .with_direction(Direction::Down)
            .with_color("#ffffff")
    }

    /// Pulsing outlined bubbles that dodge the pointer.
    pub fn bubbles() -> Self {
        Self::new()
            .with_variant(Variant::Bubbles)
            .with_particle_count(20)
            .with_speed(1.0)
            .with_direction(Direction::Up)
            .with_color("#a855f7")
            .with_interactive(true)
    }

    /// Drifting constellation.
    pub fn floating() -> Self {
        Self::new()
            .with_variant(Variant::Floating)
            .with_particle_count(50)
            .with_speed(0.8)
            .with_direction(Direction::Random)
            .with_color("#a855f7")
            .with_connect_lines(true)
            .with_interactive(true)
    }

    /// Drifting kanji on their own, no particles.
    pub fn japanese() -> Self {
        Self::new()
            .with_particle_count(0)
            .with_fade_edges(false)
            .with_ambient_glyphs(true)
    }

    // -- Builder pattern --

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_particle_size(mut self, size: f32) -> Self {
        self.particle_size = size;
        self
    }

    pub fn with_color(mut self, hex: &str) -> Self {
        self.particle_color = hex.to_owned();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_connect_lines(mut self, connect: bool) -> Self {
        self.connect_lines = connect;
        self
    }

    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.connection_distance = distance;
        self
    }

    pub fn with_fade_edges(mut self, fade: bool) -> Self {
        self.fade_edges = fade;
        self
    }

    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    pub fn with_ambient_glyphs(mut self, ambient: bool) -> Self {
        self.ambient_glyphs = ambient;
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

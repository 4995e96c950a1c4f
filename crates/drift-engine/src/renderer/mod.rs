pub mod instance;
pub mod primitive;

// Re-export key types for convenient access
pub use instance::{LineInstance, OverlayInstance, ParticleInstance, RenderBuffer};
pub use primitive::{Edge, Frame, Glyph, LineSegment, Overlay, Primitive, ShapeKind};
